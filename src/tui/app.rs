// TUI application state
//
// App composes the page components; none of them read each other's state.
// All timing goes through one Scheduler fed with wall-clock time since the
// App started:
//
//   key / paste / focus ─▶ App method ─▶ component ─▶ schedule / cancel
//   fire_due_timers()   ─▶ dispatch_timer ─▶ rotator | upload stub
//   preview task        ─▶ apply_preview (generation checked)

use super::components::{AuthForm, AuthPanel, LogsPanel, TextField, Toast};
use super::modal::Modal;
use super::traits::Interactive;
use crate::config::Config;
use crate::error::PageError;
use crate::logging::LogBuffer;
use crate::rotator::{RotatorTimer, TextRotator};
use crate::scheduler::Scheduler;
use crate::startup::StartupRegistry;
use crate::theme::Theme;
use crate::toggle::ExclusiveToggleGroup;
use crate::upload::{preview, FileRef, Preview, PreviewRequest, UploadKind, UploadStub, UploadTimer};
use crate::wizard::StudyWizard;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Chat / study interface tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Chat,
    Study,
}

impl Interface {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Study => "Study",
        }
    }
}

/// Every timer payload the App schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Rotator(RotatorTimer),
    Upload(UploadTimer),
}

impl From<RotatorTimer> for Timer {
    fn from(t: RotatorTimer) -> Self {
        Timer::Rotator(t)
    }
}

impl From<UploadTimer> for Timer {
    fn from(t: UploadTimer) -> Self {
        Timer::Upload(t)
    }
}

/// Focus ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Auth,
    Interface,
    Logs,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Auth => Focus::Interface,
            Focus::Interface => Focus::Logs,
            Focus::Logs => Focus::Auth,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Auth => Focus::Logs,
            Focus::Interface => Focus::Auth,
            Focus::Logs => Focus::Interface,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Focus::Auth => "Account",
            Focus::Interface => "Interface",
            Focus::Logs => "Logs",
        }
    }
}

/// Decoded preview posted back from the blocking pool
#[derive(Debug)]
pub struct PreviewResult {
    pub kind: UploadKind,
    pub generation: u64,
    pub result: Result<Preview, String>,
}

/// Spinner frames for the loading indicator
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main application state for the TUI
pub struct App {
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub logs_panel: LogsPanel,

    // Page components
    pub auth: AuthPanel,
    pub interface: ExclusiveToggleGroup<Interface>,
    pub chat_input: TextField,
    pub rotator: Option<TextRotator>,
    pub wizard: StudyWizard,
    dialux: UploadStub,
    image: UploadStub,

    // Timing
    scheduler: Scheduler<Timer>,
    clock_start: Instant,

    // UI state
    pub focus: Focus,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    terminal_focused: bool,
    /// Whether the rotator currently considers the chat input focused
    chat_focused: bool,
    spinner_frame: usize,

    preview_tx: mpsc::Sender<PreviewResult>,
}

impl App {
    /// Build every page component, reporting each to the startup registry
    ///
    /// A missing typewriter is logged and the page runs without it. The
    /// toggle groups have fixed members, so their failure is a bug and
    /// aborts startup.
    pub fn new(
        log_buffer: LogBuffer,
        config: &Config,
        registry: &mut StartupRegistry,
        preview_tx: mpsc::Sender<PreviewResult>,
    ) -> Result<Self> {
        let rotator = match TextRotator::new(&config.typewriter) {
            Ok(rotator) => {
                registry.activate("typewriter");
                Some(rotator)
            }
            Err(e) => {
                tracing::error!("{}", e);
                registry.fail("typewriter", e.to_string());
                None
            }
        };

        let auth = AuthPanel::new().context("building auth panel")?;
        registry.activate("auth");

        let interface = ExclusiveToggleGroup::with_default(
            "Interface",
            [Interface::Chat, Interface::Study],
            Interface::Chat,
        )
        .context("building interface tabs")?;
        registry.activate("interface");

        let wizard = StudyWizard::new().context("building study wizard")?;
        registry.activate("wizard");

        let dialux = UploadStub::new(UploadKind::Dialux, config.upload.clone());
        let image = UploadStub::new(UploadKind::Image, config.upload.clone());
        for kind in UploadKind::ALL {
            registry.activate(kind.profile().id);
        }

        Ok(Self {
            theme: Theme::luxscale(config.use_theme_background),
            log_buffer,
            logs_panel: LogsPanel::new(),
            auth,
            interface,
            chat_input: TextField::new(),
            rotator,
            wizard,
            dialux,
            image,
            scheduler: Scheduler::new(),
            clock_start: Instant::now(),
            focus: Focus::default(),
            modal: None,
            toast: None,
            should_quit: false,
            terminal_focused: true,
            chat_focused: false,
            spinner_frame: 0,
            preview_tx,
        })
    }

    /// Kick off the typewriter
    pub fn start(&mut self) {
        if let Some(rotator) = self.rotator.as_mut() {
            rotator.start(&mut self.scheduler);
        }
        self.sync_chat_focus();
    }

    pub fn upload(&self, kind: UploadKind) -> &UploadStub {
        match kind {
            UploadKind::Dialux => &self.dialux,
            UploadKind::Image => &self.image,
        }
    }

    fn upload_mut(&mut self, kind: UploadKind) -> &mut UploadStub {
        match kind {
            UploadKind::Dialux => &mut self.dialux,
            UploadKind::Image => &mut self.image,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────────────────────────

    fn elapsed(&self) -> Duration {
        self.clock_start.elapsed()
    }

    pub fn uptime(&self) -> Duration {
        self.elapsed()
    }

    /// How long the event loop may sleep before a timer is due
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.elapsed()))
    }

    /// Fire everything due by now; returns whether anything fired
    ///
    /// Also moves the scheduler clock to now, so the event loop calls this
    /// before handling input and new timers count from the present.
    pub fn fire_due_timers(&mut self) -> bool {
        let now = self.elapsed();
        let mut fired = false;
        while let Some(timer) = self.scheduler.next_due(now) {
            self.dispatch_timer(timer);
            fired = true;
        }
        fired
    }

    fn dispatch_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Rotator(t) => {
                if let Some(rotator) = self.rotator.as_mut() {
                    rotator.on_timer(t, &mut self.scheduler);
                }
            }
            Timer::Upload(t) => {
                let kind = t.kind();
                let stub = match kind {
                    UploadKind::Dialux => &mut self.dialux,
                    UploadKind::Image => &mut self.image,
                };
                if let Some(outcome) = stub.on_timer(t, &mut self.scheduler) {
                    // Dismiss the dialog, then report
                    if self.modal.as_ref().and_then(Modal::upload_kind) == Some(kind) {
                        self.modal = None;
                    }
                    self.modal = Some(Modal::notice(
                        kind.profile().title,
                        outcome.message,
                    ));
                    self.sync_chat_focus();
                }
            }
        }
    }

    pub fn tick_animation(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.spinner_frame]
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.sync_chat_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.sync_chat_focus();
    }

    /// Terminal window gained or lost focus
    pub fn set_terminal_focus(&mut self, focused: bool) {
        self.terminal_focused = focused;
        self.sync_chat_focus();
    }

    pub fn focus_hint(&self) -> &'static str {
        match self.focus {
            Focus::Auth => self.auth.focus_hint().unwrap_or(""),
            Focus::Interface => match self.active_interface() {
                Interface::Chat => "type a message  Enter:send",
                Interface::Study => match self.wizard.step() {
                    crate::wizard::WizardStep::DefineArea => "↑↓:field  digits  Enter:continue",
                    crate::wizard::WizardStep::ChooseApplication => {
                        "↑↓:move  Space:select  Enter:continue  Esc:back"
                    }
                },
            },
            Focus::Logs => self.logs_panel.focus_hint().unwrap_or(""),
        }
    }

    /// Whether the chat input has keyboard focus right now
    pub fn chat_has_focus(&self) -> bool {
        self.terminal_focused
            && self.modal.is_none()
            && self.focus == Focus::Interface
            && self.active_interface() == Interface::Chat
    }

    /// Translate focus changes into rotator focus/blur signals
    pub fn sync_chat_focus(&mut self) {
        let focused = self.chat_has_focus();
        if focused == self.chat_focused {
            return;
        }
        self.chat_focused = focused;

        let input_is_empty = self.chat_input.is_empty();
        if let Some(rotator) = self.rotator.as_mut() {
            if focused {
                rotator.on_focus(&mut self.scheduler);
            } else {
                rotator.on_blur(input_is_empty, &mut self.scheduler);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Toggle groups
    // ─────────────────────────────────────────────────────────────────────

    pub fn active_interface(&self) -> Interface {
        self.interface.active().unwrap_or(Interface::Chat)
    }

    pub fn switch_auth_form(&mut self) {
        self.auth.switch_form();
        tracing::debug!(
            group = self.auth.forms.name(),
            active = ?self.auth.active_form(),
            "form switched"
        );
    }

    /// Cycle the chat / study tabs; `forward` false goes the other way
    pub fn switch_interface(&mut self, forward: bool) {
        let transition = if forward {
            self.interface.next()
        } else {
            self.interface.previous()
        };
        if let Some(t) = transition {
            tracing::debug!(
                group = self.interface.name(),
                from = ?t.from,
                to = ?t.to,
                count = self.interface.transitions(),
                "panel switched"
            );
        }
        self.sync_chat_focus();
    }

    pub fn auth_submit(&mut self) {
        let form = self.auth.active_form();
        let missing = self.auth.missing_fields();
        if !missing.is_empty() {
            self.show_toast_warning(format!("Please fill in: {}", missing.join(", ")));
            return;
        }
        tracing::info!(form = ?form, "auth submitted; accounts are not available offline");
        let verb = match form {
            AuthForm::Login => "Sign-in",
            AuthForm::Signup => "Sign-up",
        };
        self.show_toast(format!("{} is not available in this preview", verb));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Chat
    // ─────────────────────────────────────────────────────────────────────

    /// Report an edit of the chat input to the rotator
    pub fn chat_edited(&mut self, before: &str) {
        if self.chat_input.value() == before {
            return;
        }
        let input_is_empty = self.chat_input.is_empty();
        if let Some(rotator) = self.rotator.as_mut() {
            rotator.on_input(input_is_empty, &mut self.scheduler);
        }
    }

    pub fn chat_submit(&mut self) {
        if self.chat_input.value().trim().is_empty() {
            return;
        }
        tracing::info!(chars = self.chat_input.value().chars().count(), "chat message discarded");
        let before = self.chat_input.value().to_string();
        self.chat_input.clear();
        self.chat_edited(&before);
        self.show_toast("Chat is not connected in this preview");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Study wizard
    // ─────────────────────────────────────────────────────────────────────

    pub fn wizard_continue(&mut self) {
        let result = match self.wizard.step() {
            crate::wizard::WizardStep::DefineArea => {
                self.wizard.continue_to_application().map(|_| None)
            }
            crate::wizard::WizardStep::ChooseApplication => {
                self.wizard.continue_from_application().map(Some)
            }
        };
        match result {
            Ok(Some(message)) => {
                tracing::info!("{}", message);
                self.show_notice("Study", message);
            }
            Ok(None) => {}
            Err(e) => self.show_page_error(e),
        }
    }

    pub fn wizard_back(&mut self) {
        if let Err(e) = self.wizard.back_to_area() {
            self.show_page_error(e);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Upload dialogs
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_upload(&mut self, kind: UploadKind) {
        tracing::debug!(dialog = kind.profile().id, "upload dialog opened");
        self.modal = Some(Modal::upload(kind));
        self.sync_chat_focus();
    }

    /// Close the dialog; whatever was in it is discarded
    pub fn close_upload(&mut self, kind: UploadKind) {
        let stub = match kind {
            UploadKind::Dialux => &mut self.dialux,
            UploadKind::Image => &mut self.image,
        };
        stub.reset(&mut self.scheduler);
        self.modal = None;
        self.sync_chat_focus();
    }

    /// Typed or dropped path for the open dialog
    pub fn upload_accept_text(&mut self, kind: UploadKind, text: &str) {
        let file = match FileRef::from_input(text) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(dialog = kind.profile().id, "{}", e);
                self.show_toast_warning(e.to_string());
                return;
            }
        };

        let stub = match kind {
            UploadKind::Dialux => &mut self.dialux,
            UploadKind::Image => &mut self.image,
        };
        match stub.accept(file, &mut self.scheduler) {
            Ok(Some(request)) => self.spawn_preview(request),
            Ok(None) => {}
            Err(e) => self.show_toast_warning(e.to_string()),
        }
    }

    pub fn upload_submit(&mut self, kind: UploadKind) {
        let stub = match kind {
            UploadKind::Dialux => &mut self.dialux,
            UploadKind::Image => &mut self.image,
        };
        if let Err(e) = stub.submit(&mut self.scheduler) {
            self.show_toast_warning(e.to_string());
        }
    }

    /// Bracketed paste: a dropped file lands here as its path
    ///
    /// An open upload dialog takes the text as a path. Otherwise it goes
    /// to whichever text input has focus.
    pub fn paste(&mut self, text: &str) {
        if let Some(kind) = self.modal.as_ref().and_then(Modal::upload_kind) {
            self.upload_accept_text(kind, text);
            return;
        }
        if self.modal.is_some() {
            return;
        }

        match self.focus {
            Focus::Auth => self.auth.paste(text),
            Focus::Interface if self.active_interface() == Interface::Chat => {
                let before = self.chat_input.value().to_string();
                self.chat_input.insert_str(text);
                self.chat_edited(&before);
            }
            _ => {}
        }
    }

    fn spawn_preview(&self, request: PreviewRequest) {
        let tx = self.preview_tx.clone();
        tokio::spawn(async move {
            let result = preview::load(request.path)
                .await
                .map_err(|e| format!("{:#}", e));
            let _ = tx
                .send(PreviewResult {
                    kind: request.kind,
                    generation: request.generation,
                    result,
                })
                .await;
        });
    }

    pub fn apply_preview(&mut self, preview: PreviewResult) {
        self.upload_mut(preview.kind)
            .preview_loaded(preview.generation, preview.result);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Notices and toasts
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_notice(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = Some(Modal::notice(title, message));
        self.sync_chat_focus();
    }

    fn show_page_error(&mut self, error: PageError) {
        match error {
            PageError::EmptyInput(_) => self.show_notice("Study", error.user_message()),
            other => {
                tracing::error!("{}", other);
                self.show_toast_warning(other.to_string());
            }
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn show_toast_warning(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::warning(message));
    }

    /// Clear toast if it has expired
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// Drop the modal, resetting an upload dialog if that is what it was
    pub fn close_modal(&mut self) {
        match self.modal.as_ref().and_then(Modal::upload_kind) {
            Some(kind) => self.close_upload(kind),
            None => {
                self.modal = None;
                self.sync_chat_focus();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{DimensionField, WizardStep, MSG_NEED_DIMENSION};

    fn app() -> App {
        let config = Config::default();
        let mut registry = StartupRegistry::from_config(&config);
        let (tx, _rx) = mpsc::channel(4);
        App::new(LogBuffer::new(), &config, &mut registry, tx).unwrap()
    }

    #[test]
    fn test_new_reports_components() {
        let config = Config::default();
        let mut registry = StartupRegistry::from_config(&config);
        let (tx, _rx) = mpsc::channel(4);
        let app = App::new(LogBuffer::new(), &config, &mut registry, tx).unwrap();

        assert!(app.rotator.is_some());
        assert_eq!(registry.failed_count(), 0);
        for id in ["typewriter", "auth", "interface", "wizard", "dialux", "image"] {
            assert_eq!(
                registry.status(id),
                Some(&crate::startup::FeatureStatus::Active),
                "{id}"
            );
        }
    }

    #[test]
    fn test_missing_texts_run_without_rotator() {
        let mut config = Config::default();
        config.typewriter.texts.clear();
        let mut registry = StartupRegistry::from_config(&config);
        let (tx, _rx) = mpsc::channel(4);
        let app = App::new(LogBuffer::new(), &config, &mut registry, tx).unwrap();

        assert!(app.rotator.is_none());
        assert!(matches!(
            registry.status("typewriter"),
            Some(crate::startup::FeatureStatus::Failed(_))
        ));
    }

    #[test]
    fn test_focusing_chat_pauses_rotator() {
        let mut app = app();
        app.start();
        assert!(app.scheduler.next_deadline().is_some());

        // Auth → Interface (chat tab is the default)
        app.focus_next();
        assert!(app.chat_has_focus());
        assert!(app.scheduler.is_empty());

        // Leaving with an empty input resumes
        app.focus_next();
        assert!(app.rotator.as_ref().unwrap().is_active());
        assert!(!app.scheduler.is_empty());
    }

    #[test]
    fn test_switching_to_study_blurs_chat() {
        let mut app = app();
        app.start();
        app.focus_next();
        assert!(app.scheduler.is_empty());

        app.switch_interface(true);
        assert_eq!(app.active_interface(), Interface::Study);
        assert!(!app.chat_has_focus());
        assert!(!app.scheduler.is_empty());
    }

    #[test]
    fn test_wizard_validation_shows_notice() {
        let mut app = app();
        app.wizard_continue();
        match &app.modal {
            Some(Modal::Notice { message, .. }) => assert_eq!(message, MSG_NEED_DIMENSION),
            other => panic!("expected notice, got {:?}", other),
        }
        assert_eq!(app.wizard.step(), WizardStep::DefineArea);

        app.close_modal();
        app.wizard.set_dimension(DimensionField::Width, "4");
        app.wizard_continue();
        assert!(app.modal.is_none());
        assert_eq!(app.wizard.step(), WizardStep::ChooseApplication);
    }

    #[test]
    fn test_closing_upload_dialog_cancels_processing() {
        let mut app = app();
        let path = std::env::temp_dir().join(format!("luxscale-app-{}.pdf", std::process::id()));
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        app.open_upload(UploadKind::Dialux);
        app.upload_accept_text(UploadKind::Dialux, &path.display().to_string());
        assert!(app.upload(UploadKind::Dialux).can_submit());

        app.upload_submit(UploadKind::Dialux);
        app.close_modal();
        assert!(app.modal.is_none());
        assert!(app.scheduler.is_empty());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_dropped_path_fills_open_upload_dialog() {
        let mut app = app();
        let path = std::env::temp_dir().join(format!("luxscale-drop-{}.ldt", std::process::id()));
        std::fs::write(&path, b"ldt").unwrap();

        // Terminals quote dropped paths
        app.open_upload(UploadKind::Dialux);
        app.paste(&format!("'{}'", path.display()));

        let stub = app.upload(UploadKind::Dialux);
        assert!(stub.can_submit());
        assert_eq!(
            stub.record().map(|r| r.file_name.as_str()),
            path.file_name().and_then(|n| n.to_str())
        );
        assert_eq!(app.chat_input.value(), "");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_paste_without_dialog_goes_to_chat() {
        let mut app = app();
        app.start();
        app.focus_next();
        assert!(app.chat_has_focus());

        app.paste("office lighting");
        assert_eq!(app.chat_input.value(), "office lighting");
        assert!(!app.rotator.as_ref().unwrap().is_active());
        assert!(!app.upload(UploadKind::Dialux).can_submit());
    }

    #[test]
    fn test_processing_result_replaces_dialog_with_notice() {
        let mut app = app();
        let path = std::env::temp_dir().join(format!("luxscale-done-{}.ldt", std::process::id()));
        std::fs::write(&path, b"ldt").unwrap();

        app.open_upload(UploadKind::Dialux);
        app.upload_accept_text(UploadKind::Dialux, &path.display().to_string());
        app.upload_submit(UploadKind::Dialux);

        // Drive the scheduler directly instead of sleeping
        while let Some(timer) = app.scheduler.next_due(Duration::from_secs(60)) {
            app.dispatch_timer(timer);
        }

        match &app.modal {
            Some(Modal::Notice { message, .. }) => {
                assert!(message.starts_with("Dialux report processed successfully!"))
            }
            other => panic!("expected notice, got {:?}", other),
        }
        assert!(!app.upload(UploadKind::Dialux).can_submit());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bad_path_shows_warning_toast() {
        let mut app = app();
        app.open_upload(UploadKind::Dialux);
        app.upload_accept_text(UploadKind::Dialux, "/no/such/file.pdf");
        assert!(app.toast.is_some());
        assert!(!app.upload(UploadKind::Dialux).can_submit());
    }
}
