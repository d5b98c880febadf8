//! Single-line text input
//!
//! Cursor positions count characters, not bytes, so editing never splits a
//! multi-byte character.

use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Cursor position in characters
    cursor: usize,
    /// Render as bullets
    pub masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text as it should appear on screen
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text, keeping only the first line
    pub fn insert_str(&mut self, text: &str) {
        for c in text.lines().next().unwrap_or("").chars() {
            self.insert(c);
        }
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

impl Interactive for TextField {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Handled::No;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert(c);
                Handled::Yes
            }
            KeyCode::Backspace => {
                self.backspace();
                Handled::Yes
            }
            KeyCode::Delete => {
                self.delete();
                Handled::Yes
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                Handled::Yes
            }
            KeyCode::Home => {
                self.cursor = 0;
                Handled::Yes
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("type to edit  ←→:move")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_in_the_middle_of_multibyte_text() {
        let mut field = TextField::new();
        field.insert_str("lüx");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "lx");
        field.insert('ü');
        assert_eq!(field.value(), "lüx");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_control_keys_bubble_up() {
        let mut field = TextField::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(field.handle_key(ctrl_c), Handled::No);
        assert!(field.is_empty());
    }

    #[test]
    fn test_masked_display() {
        let mut field = TextField::masked();
        field.insert_str("secret\nignored");
        assert_eq!(field.value(), "secret");
        assert_eq!(field.display(), "••••••");
    }

    #[test]
    fn test_backspace_and_delete_at_bounds() {
        let mut field = TextField::new();
        assert!(!field.backspace());
        field.insert('a');
        assert!(!field.delete());
        field.handle_key(key(KeyCode::Home));
        assert!(field.delete());
        assert!(field.is_empty());
    }
}
