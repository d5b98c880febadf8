//! Page error types
//!
//! Every error here ends the current action only. Nothing in the page
//! controller is fatal: a component that fails to build is logged and left
//! out, a failed validation is shown to the user as a notice.

use std::fmt;
use std::path::PathBuf;

/// Errors raised by page components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// A component was built without a target it needs
    MissingElement {
        component: &'static str,
        detail: String,
    },
    /// A validation step found nothing to continue with
    EmptyInput(String),
    /// A toggle group was asked to show a panel it does not own
    UnknownPanel {
        group: &'static str,
        panel: String,
    },
}

impl PageError {
    pub fn missing(component: &'static str, detail: impl Into<String>) -> Self {
        Self::MissingElement {
            component,
            detail: detail.into(),
        }
    }

    /// Message suitable for a blocking notice
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement { component, detail } => {
                write!(f, "{} elements not found: {}", component, detail)
            }
            Self::EmptyInput(message) => write!(f, "{}", message),
            Self::UnknownPanel { group, panel } => {
                write!(f, "panel '{}' is not part of the {} group", panel, group)
            }
        }
    }
}

impl std::error::Error for PageError {}

/// Errors raised by the upload dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// A file was offered while the previous one is still processing
    Busy,
    /// Submit was pressed with no file accepted
    NotReady,
    /// The path entered or dropped was blank
    EmptyPath,
    /// The file could not be inspected
    FileUnavailable { path: PathBuf, reason: String },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "Still processing the previous file"),
            Self::NotReady => write!(f, "Choose a file before submitting"),
            Self::EmptyPath => write!(f, "No file path given"),
            Self::FileUnavailable { path, reason } => {
                write!(f, "Cannot read {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for UploadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_user_message_is_verbatim() {
        let err = PageError::EmptyInput("Please enter at least one dimension.".into());
        assert_eq!(err.user_message(), "Please enter at least one dimension.");
    }

    #[test]
    fn test_missing_element_display() {
        let err = PageError::missing("Typewriter", "no texts configured");
        assert_eq!(
            err.to_string(),
            "Typewriter elements not found: no texts configured"
        );
    }

    #[test]
    fn test_upload_error_display() {
        let err = UploadError::FileUnavailable {
            path: PathBuf::from("/tmp/missing.ldt"),
            reason: "No such file or directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read /tmp/missing.ldt: No such file or directory"
        );
    }
}
