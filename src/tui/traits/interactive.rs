//! Interactive trait for widgets that handle keyboard input

use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the widget consumed the event or if it should
/// bubble up for App-level handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the widget
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for widgets that handle keyboard input
pub trait Interactive {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the widget consumed the event,
    /// `Handled::No` if it should bubble up to the App.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for status bar when this widget is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
