//! Upload dialog timings
//!
//! Both dialogs fake their backend with fixed delays; these are the knobs.

use serde::Deserialize;
use std::time::Duration;

/// Simulated upload timings, shared by both dialogs
#[derive(Debug, Clone, PartialEq)]
pub struct UploadTiming {
    /// How long the upload area shows its loading indicator after a file lands
    pub settle_delay: Duration,
    /// How long "Processing..." lasts before the canned success
    pub processing_delay: Duration,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            processing_delay: Duration::from_millis(3000),
        }
    }
}

/// Upload settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileUpload {
    pub settle_delay_ms: Option<u64>,
    pub processing_delay_ms: Option<u64>,
}

impl UploadTiming {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileUpload>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            settle_delay: file
                .settle_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
            processing_delay: file
                .processing_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.processing_delay),
        }
    }
}
