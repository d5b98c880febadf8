//! Typewriter animation configuration
//!
//! Texts cycled through the chat placeholder, plus the three step intervals
//! and the initial delay.

use serde::Deserialize;
use std::time::Duration;

/// Default rotation, in display order
pub const DEFAULT_TEXTS: &[&str] = &[
    "I can tell you about lighting technicalities",
    "I can recommend the perfect lighting options",
    "I can analyze a Dialux report and remake it with LuxSCale",
    "I can make you a sketch lighting design from an image",
];

/// Floor for the step intervals; a zero step would keep the rotator due forever
pub const MIN_STEP: Duration = Duration::from_millis(1);

/// Typewriter placeholder settings
#[derive(Debug, Clone, PartialEq)]
pub struct TypewriterConfig {
    /// Texts to type, in order
    pub texts: Vec<String>,
    /// Delay between typed characters
    pub type_speed: Duration,
    /// Delay between deleted characters
    pub delete_speed: Duration,
    /// Hold time once a text is fully typed
    pub pause: Duration,
    /// Delay before the first character
    pub start_delay: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            texts: DEFAULT_TEXTS.iter().map(|s| s.to_string()).collect(),
            type_speed: Duration::from_millis(100),
            delete_speed: Duration::from_millis(50),
            pause: Duration::from_millis(2000),
            start_delay: Duration::from_millis(500),
        }
    }
}

/// Typewriter settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTypewriter {
    pub texts: Option<Vec<String>>,
    pub type_speed_ms: Option<u64>,
    pub delete_speed_ms: Option<u64>,
    pub pause_ms: Option<u64>,
    pub start_delay_ms: Option<u64>,
}

impl TypewriterConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTypewriter>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            texts: file.texts.unwrap_or(defaults.texts),
            type_speed: file
                .type_speed_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.type_speed)
                .max(MIN_STEP),
            delete_speed: file
                .delete_speed_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.delete_speed)
                .max(MIN_STEP),
            pause: file
                .pause_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.pause)
                .max(MIN_STEP),
            start_delay: file
                .start_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.start_delay),
        }
    }
}
