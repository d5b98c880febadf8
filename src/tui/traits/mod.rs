//! Input contract for TUI widgets
//!
//! The App routes keys to whatever has focus. Widgets that take keyboard
//! input implement [`Interactive`] and report whether they consumed the
//! event; anything left unhandled falls through to App-level bindings.
//!
//! ```text
//! KeyEvent ─▶ Modal ─▶ Global (F-keys, Tab, Ctrl+C) ─▶ Focused widget ─▶ App fallback
//! ```

mod interactive;

pub use interactive::{Handled, Interactive};
