//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Render a string as a TOML literal (quoted and escaped)
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize the typewriter texts as a multi-line TOML array
    fn texts_to_toml(&self) -> String {
        let mut output = String::from("[\n");
        for text in &self.typewriter.texts {
            output.push_str(&format!("    {},\n", toml_string(text)));
        }
        output.push(']');
        output
    }

    /// Serialize config to TOML (template written on first start)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# luxscale configuration

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Chat placeholder animation
[typewriter]
texts = {texts}
type_speed_ms = {type_ms}
delete_speed_ms = {delete_ms}
pause_ms = {pause_ms}
start_delay_ms = {start_ms}

# Upload dialogs (processing is simulated)
[upload]
settle_delay_ms = {settle_ms}
processing_delay_ms = {processing_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            use_bg = self.use_theme_background,
            texts = self.texts_to_toml(),
            type_ms = self.typewriter.type_speed.as_millis(),
            delete_ms = self.typewriter.delete_speed.as_millis(),
            pause_ms = self.typewriter.pause.as_millis(),
            start_ms = self.typewriter.start_delay.as_millis(),
            settle_ms = self.upload.settle_delay.as_millis(),
            processing_ms = self.upload.processing_delay.as_millis(),
            log_level = toml_string(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_string(&self.logging.file_prefix),
        )
    }
}
