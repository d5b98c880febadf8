//! Feature definitions for StartupRegistry
//!
//! Single source of truth for which page components exist. Adding a
//! component? Add it here and it shows up in the startup banner.

use super::Config;

impl Config {
    /// Get all component definitions based on current configuration.
    ///
    /// Components start out pending; whoever builds them reports back
    /// through `StartupRegistry::activate` / `fail`.
    pub fn feature_definitions(&self) -> Vec<crate::startup::FeatureDefinition> {
        use crate::startup::{FeatureCategory, FeatureDefinition};

        vec![
            // ─────────────────────────────────────────────────────────────────
            // Page components
            // ─────────────────────────────────────────────────────────────────
            FeatureDefinition::core("typewriter", FeatureCategory::Page, "Chat placeholder")
                .with_detail(format!("{} texts", self.typewriter.texts.len())),
            FeatureDefinition::core("auth", FeatureCategory::Page, "Login / signup toggle"),
            FeatureDefinition::core("interface", FeatureCategory::Page, "Chat / study toggle"),
            FeatureDefinition::core("wizard", FeatureCategory::Page, "Study steps"),
            // ─────────────────────────────────────────────────────────────────
            // Upload dialogs
            // ─────────────────────────────────────────────────────────────────
            FeatureDefinition::core("dialux", FeatureCategory::Upload, "DIALux report upload")
                .with_detail(format!(
                    "{}ms simulated",
                    self.upload.processing_delay.as_millis()
                )),
            FeatureDefinition::core("image", FeatureCategory::Upload, "Image upload + preview")
                .with_detail(format!(
                    "{}ms simulated",
                    self.upload.processing_delay.as_millis()
                )),
            // ─────────────────────────────────────────────────────────────────
            // Interface
            // ─────────────────────────────────────────────────────────────────
            FeatureDefinition::optional(
                "tui",
                FeatureCategory::Interface,
                self.enable_tui,
                "Terminal interface",
            ),
            FeatureDefinition::optional(
                "file-log",
                FeatureCategory::Interface,
                self.logging.file_enabled,
                "JSON log files",
            ),
        ]
    }
}
