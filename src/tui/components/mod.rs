// Components module - UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: brand
// - Status bar: key hints for the focused area
// - Logs panel: system log entries
//
// Page components render the App's state machines:
// - Auth panel: login / signup card
// - Chat panel: input with typewriter placeholder
// - Study panel: the two wizard steps
// - Upload dialog: DIALux / image modal body

pub mod auth_panel;
pub mod chat_panel;
pub mod logs_panel;
pub mod status_bar;
pub mod study_panel;
pub mod text_field;
pub mod title_bar;
pub mod toast;
pub mod upload_dialog;

pub use auth_panel::{AuthForm, AuthPanel};
pub use logs_panel::LogsPanel;
pub use text_field::TextField;
pub use toast::Toast;
