// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crate::upload::UploadKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Take the typed path into the upload dialog
    AcceptPath(String),
    /// Start processing the accepted file
    Submit,
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Blocking message; Enter or Esc dismisses
    Notice { title: String, message: String },
    /// Upload dialog with its path entry line
    Upload { kind: UploadKind, path: String },
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        Modal::Notice {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn upload(kind: UploadKind) -> Self {
        Modal::Upload {
            kind,
            path: String::new(),
        }
    }

    /// Upload dialog kind, if this is one
    pub fn upload_kind(&self) -> Option<UploadKind> {
        match self {
            Modal::Upload { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyEvent) -> ModalAction {
        match self {
            Modal::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
            Modal::Notice { .. } => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Upload { path, .. } => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => {
                    if path.trim().is_empty() {
                        ModalAction::Submit
                    } else {
                        ModalAction::AcceptPath(std::mem::take(path))
                    }
                }
                KeyCode::Backspace => {
                    path.pop();
                    ModalAction::None
                }
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    path.push(c);
                    ModalAction::None
                }
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_upload_enter_accepts_typed_path() {
        let mut modal = Modal::upload(UploadKind::Dialux);
        for c in "/tmp/a.pdf".chars() {
            modal.handle_input(press(KeyCode::Char(c)));
        }
        assert_eq!(
            modal.handle_input(press(KeyCode::Enter)),
            ModalAction::AcceptPath("/tmp/a.pdf".to_string())
        );
        // Path line is cleared, so the next Enter submits
        assert_eq!(modal.handle_input(press(KeyCode::Enter)), ModalAction::Submit);
    }

    #[test]
    fn test_upload_escape_closes() {
        let mut modal = Modal::upload(UploadKind::Image);
        assert_eq!(modal.handle_input(press(KeyCode::Esc)), ModalAction::Close);
        assert_eq!(modal.upload_kind(), Some(UploadKind::Image));
    }

    #[test]
    fn test_notice_and_help_close() {
        let mut notice = Modal::notice("Study", "Proceeding with Office application...");
        assert_eq!(notice.handle_input(press(KeyCode::Enter)), ModalAction::Close);

        let mut help = Modal::help();
        assert_eq!(help.handle_input(press(KeyCode::Char('x'))), ModalAction::None);
        assert_eq!(help.handle_input(press(KeyCode::Char('?'))), ModalAction::Close);
    }
}
