// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard, paste, focus, timers, preview results)
// - Layered key dispatch into the App

pub mod app;
pub mod components;
pub mod layout;
pub mod modal;
pub mod traits;
pub mod views;

use crate::upload::UploadKind;
use crate::wizard::WizardStep;
use anyhow::{Context, Result};
use app::{App, Focus, Interface, PreviewResult};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::{Handled, Interactive};

/// Longest the loop sleeps when no timer or toast is waiting
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Run the TUI
///
/// Takes an App already built by main (so the startup banner reflects what
/// came up) and the receiving end of its preview channel. Sets up the
/// terminal, runs the event loop, and restores the terminal even when the
/// loop fails.
pub async fn run_tui(mut app: App, mut preview_rx: mpsc::Receiver<PreviewResult>) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableFocusChange
    )
    .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.start();
    tracing::info!("LuxScale page ready");

    let result = run_event_loop(&mut terminal, &mut app, &mut preview_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        DisableFocusChange
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keys, paste, focus changes, resize)
/// 2. The next scheduler deadline or toast expiry
/// 3. Decoded image previews
///
/// Due timers are fired at the top of every iteration so handlers always
/// see a scheduler clock that matches the wall clock.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    preview_rx: &mut mpsc::Receiver<PreviewResult>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        app.fire_due_timers();
        app.clear_expired_toast();

        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        let wait = next_wake(app);

        tokio::select! {
            // Terminal input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    // Timers that came due while polling fire first
                    app.fire_due_timers();
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Paste(text)) => app.paste(&text),
                        Ok(Event::FocusGained) => app.set_terminal_focus(true),
                        Ok(Event::FocusLost) => app.set_terminal_focus(false),
                        _ => {}
                    }
                }
            } => {}

            // Next timer or toast expiry
            _ = tokio::time::sleep(wait) => {}

            // Spinner animation
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(preview) = preview_rx.recv() => {
                app.apply_preview(preview);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// How long to sleep before something on screen has to change
fn next_wake(app: &App) -> Duration {
    let toast = app.toast.as_ref().map(|t| t.remaining());
    [app.time_until_next_timer(), toast]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(IDLE_WAIT)
        .min(IDLE_WAIT)
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Focused area
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits, even over a modal
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, key) {
        return;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, key) {
        return;
    }

    // Layer 3: Focused area
    match app.focus {
        Focus::Auth => {
            if app.auth.handle_key(key) == Handled::No && key.code == KeyCode::Enter {
                app.auth_submit();
            }
        }
        Focus::Interface => match app.active_interface() {
            Interface::Chat => handle_chat_key(app, key),
            Interface::Study => handle_study_key(app, key),
        },
        Focus::Logs => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('?') => app.modal = Some(Modal::help()),
            _ => {
                app.logs_panel.handle_key(key);
            }
        },
    }
}

/// Returns true if a modal consumed the key
fn handle_modal_input(app: &mut App, key: KeyEvent) -> bool {
    let Some(modal) = app.modal.as_mut() else {
        return false;
    };

    let kind = modal.upload_kind();
    match modal.handle_input(key) {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::AcceptPath(path) => {
            if let Some(kind) = kind {
                app.upload_accept_text(kind, &path);
            }
        }
        ModalAction::Submit => {
            if let Some(kind) = kind {
                app.upload_submit(kind);
            }
        }
    }
    true
}

/// Returns true if the key was a global binding
fn handle_global_keys(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::F(1) => {
            app.modal = Some(Modal::help());
            app.sync_chat_focus();
        }
        KeyCode::F(2) => app.open_upload(UploadKind::Dialux),
        KeyCode::F(3) => app.open_upload(UploadKind::Image),
        KeyCode::F(4) => app.switch_auth_form(),
        KeyCode::F(5) => {
            let forward = !key.modifiers.contains(KeyModifiers::SHIFT);
            app.switch_interface(forward);
        }
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        _ => return false,
    }
    true
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.chat_submit();
        return;
    }
    let before = app.chat_input.value().to_string();
    if app.chat_input.handle_key(key).was_handled() {
        app.chat_edited(&before);
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    match app.wizard.step() {
        WizardStep::DefineArea => match key.code {
            KeyCode::Up => app.wizard.focus_prev(),
            KeyCode::Down => app.wizard.focus_next(),
            KeyCode::Backspace => app.wizard.backspace(),
            KeyCode::Enter => app.wizard_continue(),
            KeyCode::Char(c) => {
                app.wizard.insert_char(c);
            }
            _ => {}
        },
        WizardStep::ChooseApplication => match key.code {
            KeyCode::Up => app.wizard.cursor_prev(),
            KeyCode::Down => app.wizard.cursor_next(),
            KeyCode::Char(' ') => app.wizard.select_cursor(),
            KeyCode::Enter => app.wizard_continue(),
            KeyCode::Esc | KeyCode::Backspace => app.wizard_back(),
            _ => {}
        },
    }
}
