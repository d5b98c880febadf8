// Startup module - displays banner and component status
//
// The registry starts from Config::feature_definitions(); main.rs and the
// App report back as components are built, so the banner shows what
// actually came up rather than what was configured.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// Grouping for banner display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureCategory {
    Page,
    Upload,
    Interface,
}

impl FeatureCategory {
    fn label(&self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::Upload => "Uploads",
            Self::Interface => "Interface",
        }
    }
}

/// Runtime status of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureStatus {
    /// Configured, not yet reported on
    Pending,
    /// Built and running
    Active,
    /// Switched off by configuration
    Disabled,
    /// Failed to build (reason)
    Failed(String),
}

/// One row of the startup banner
#[derive(Debug, Clone)]
pub struct FeatureDefinition {
    pub id: &'static str,
    pub category: FeatureCategory,
    pub description: &'static str,
    pub detail: Option<String>,
    pub status: FeatureStatus,
}

impl FeatureDefinition {
    /// Always-on component; status is decided when it is built
    pub fn core(id: &'static str, category: FeatureCategory, description: &'static str) -> Self {
        Self {
            id,
            category,
            description,
            detail: None,
            status: FeatureStatus::Pending,
        }
    }

    /// Component controlled by a config switch
    pub fn optional(
        id: &'static str,
        category: FeatureCategory,
        enabled: bool,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            description,
            detail: None,
            status: if enabled {
                FeatureStatus::Active
            } else {
                FeatureStatus::Disabled
            },
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Tracks which components came up
#[derive(Debug, Clone)]
pub struct StartupRegistry {
    features: Vec<FeatureDefinition>,
}

impl StartupRegistry {
    pub fn from_config(config: &Config) -> Self {
        Self {
            features: config.feature_definitions(),
        }
    }

    /// Mark a component as running
    pub fn activate(&mut self, id: &str) {
        if let Some(f) = self.features.iter_mut().find(|f| f.id == id) {
            f.status = FeatureStatus::Active;
        }
    }

    /// Mark a component as failed
    pub fn fail(&mut self, id: &str, reason: impl Into<String>) {
        if let Some(f) = self.features.iter_mut().find(|f| f.id == id) {
            f.status = FeatureStatus::Failed(reason.into());
        }
    }

    pub fn status(&self, id: &str) -> Option<&FeatureStatus> {
        self.features.iter().find(|f| f.id == id).map(|f| &f.status)
    }

    pub fn features(&self) -> &[FeatureDefinition] {
        &self.features
    }

    /// Number of components that failed to build
    pub fn failed_count(&self) -> usize {
        self.features
            .iter()
            .filter(|f| matches!(f.status, FeatureStatus::Failed(_)))
            .count()
    }
}

/// Front end the page will run under
fn mode_label(config: &Config) -> &'static str {
    if config.enable_tui {
        "TUI"
    } else {
        "headless (LUXSCALE_NO_TUI)"
    }
}

/// Print the startup banner and component status
/// This runs before the TUI takes over the screen (or in headless mode)
pub fn print_startup_with_registry(config: &Config, registry: &StartupRegistry) {
    use colors::*;

    println!();
    println!("  {BOLD}{RED}LuxScale{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Lighting assistant page{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!("  {DIM}Mode:{RESET}   {}", mode_label(config));

    let mut current: Option<FeatureCategory> = None;
    for feature in registry.features() {
        if current != Some(feature.category) {
            current = Some(feature.category);
            println!();
            println!("  {DIM}{}{RESET}", feature.category.label());
        }

        let icon = match &feature.status {
            FeatureStatus::Active => format!("{GREEN}✓{RESET}"),
            FeatureStatus::Pending | FeatureStatus::Disabled => format!("{DIM}○{RESET}"),
            FeatureStatus::Failed(_) => format!("{YELLOW}✗{RESET}"),
        };
        let detail = match (&feature.status, &feature.detail) {
            (FeatureStatus::Failed(reason), _) => format!(" {YELLOW}({}){RESET}", reason),
            (_, Some(detail)) => format!(" {DIM}({}){RESET}", detail),
            _ => String::new(),
        };

        println!(
            "    {icon} {:<12} {DIM}{}{RESET}{detail}",
            feature.id, feature.description
        );
    }
    println!();
}

/// Print startup messages to the TUI log panel
pub fn log_startup_with_registry(config: &Config, registry: &StartupRegistry) {
    tracing::info!("LuxScale v{}", VERSION);

    for feature in registry.features() {
        match &feature.status {
            FeatureStatus::Active => {
                tracing::info!("  ✓ {} - {}", feature.id, feature.description)
            }
            FeatureStatus::Failed(reason) => {
                tracing::warn!("  ✗ {} - {} ({})", feature.id, feature.description, reason)
            }
            FeatureStatus::Pending | FeatureStatus::Disabled => {
                tracing::debug!("  ○ {} - {}", feature.id, feature.description)
            }
        }
    }

    if config.enable_tui {
        tracing::info!("Ready. Tab to move focus, F1 for help");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_label_follows_tui_flag() {
        let mut config = Config::default();
        assert_eq!(mode_label(&config), "TUI");
        config.enable_tui = false;
        assert_eq!(mode_label(&config), "headless (LUXSCALE_NO_TUI)");
    }

    #[test]
    fn test_registry_tracks_status() {
        let mut registry = StartupRegistry::from_config(&Config::default());
        assert_eq!(registry.status("typewriter"), Some(&FeatureStatus::Pending));
        assert_eq!(registry.status("tui"), Some(&FeatureStatus::Active));
        assert_eq!(registry.status("file-log"), Some(&FeatureStatus::Disabled));

        registry.activate("auth");
        registry.fail("typewriter", "no texts configured");

        assert_eq!(registry.status("auth"), Some(&FeatureStatus::Active));
        assert_eq!(
            registry.status("typewriter"),
            Some(&FeatureStatus::Failed("no texts configured".into()))
        );
        assert_eq!(registry.failed_count(), 1);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut registry = StartupRegistry::from_config(&Config::default());
        registry.activate("nope");
        assert_eq!(registry.status("nope"), None);
    }
}
