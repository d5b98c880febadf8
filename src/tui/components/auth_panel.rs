// Auth card - login / signup forms on one toggle group
//
// The fields are decoration: nothing is sent anywhere. Switching forms
// keeps what was typed in the other one.

use super::text_field::TextField;
use crate::error::PageError;
use crate::toggle::{ExclusiveToggleGroup, PanelMark};
use crate::tui::app::App;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Signup,
}

impl AuthForm {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
        }
    }
}

struct LabeledField {
    label: &'static str,
    input: TextField,
}

impl LabeledField {
    fn plain(label: &'static str) -> Self {
        Self {
            label,
            input: TextField::new(),
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            label,
            input: TextField::masked(),
        }
    }
}

pub struct AuthPanel {
    pub forms: ExclusiveToggleGroup<AuthForm>,
    login: Vec<LabeledField>,
    signup: Vec<LabeledField>,
    /// Focused field within the active form
    field: usize,
}

impl AuthPanel {
    pub fn new() -> Result<Self, PageError> {
        Ok(Self {
            forms: ExclusiveToggleGroup::with_default(
                "Auth",
                [AuthForm::Login, AuthForm::Signup],
                AuthForm::Login,
            )?,
            login: vec![
                LabeledField::plain("Email"),
                LabeledField::secret("Password"),
            ],
            signup: vec![
                LabeledField::plain("Full name"),
                LabeledField::plain("Email"),
                LabeledField::secret("Password"),
            ],
            field: 0,
        })
    }

    pub fn active_form(&self) -> AuthForm {
        self.forms.active().unwrap_or(AuthForm::Login)
    }

    /// Show the other form
    pub fn switch_form(&mut self) {
        if self.forms.next().is_some() {
            self.field = 0;
        }
    }

    fn fields(&self) -> &[LabeledField] {
        match self.active_form() {
            AuthForm::Login => &self.login,
            AuthForm::Signup => &self.signup,
        }
    }

    fn fields_mut(&mut self) -> &mut [LabeledField] {
        match self.active_form() {
            AuthForm::Login => &mut self.login,
            AuthForm::Signup => &mut self.signup,
        }
    }

    /// Labels of fields left blank in the active form
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|f| f.input.value().trim().is_empty())
            .map(|f| f.label)
            .collect()
    }

    /// Paste into the focused field
    pub fn paste(&mut self, text: &str) {
        let index = self.field;
        if let Some(f) = self.fields_mut().get_mut(index) {
            f.input.insert_str(text);
        }
    }
}

impl Interactive for AuthPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let count = self.fields().len();
        match key.code {
            KeyCode::Up => {
                self.field = (self.field + count - 1) % count;
                Handled::Yes
            }
            KeyCode::Down => {
                self.field = (self.field + 1) % count;
                Handled::Yes
            }
            KeyCode::Enter => Handled::No,
            _ => {
                let index = self.field;
                match self.fields_mut().get_mut(index) {
                    Some(f) => f.input.handle_key(key),
                    None => Handled::No,
                }
            }
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:field  Enter:submit  F4:login/signup")
    }
}

/// Style for a panel title according to its toggle mark
pub fn mark_style(mark: PanelMark, app: &App) -> Style {
    match mark {
        PanelMark::Active => Style::default()
            .fg(app.theme.panel_active)
            .add_modifier(Modifier::BOLD),
        PanelMark::Previous => Style::default()
            .fg(app.theme.panel_previous)
            .add_modifier(Modifier::ITALIC),
        PanelMark::Hidden => Style::default().fg(app.theme.muted),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let panel = &app.auth;
    let border = if focused {
        app.theme.highlight
    } else {
        app.theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border))
        .title(" Account ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let titles: Vec<Line> = panel
        .forms
        .members()
        .map(|form| Line::from(Span::styled(form.title(), mark_style(panel.forms.mark(form), app))))
        .collect();
    let selected = panel
        .forms
        .members()
        .position(|form| panel.forms.is_active(form))
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .divider(" │ ")
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in panel.fields().iter().enumerate() {
        let is_current = focused && i == panel.field;
        let label_style = if is_current {
            Style::default().fg(app.theme.highlight)
        } else {
            Style::default().fg(app.theme.muted)
        };
        lines.push(Line::from(Span::styled(field.label, label_style)));

        let mut value = field.input.display();
        if is_current {
            value.push('▏');
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", value),
            Style::default().fg(app.theme.foreground),
        )));
        lines.push(Line::raw(""));
    }

    let button = format!("[ {} ]", panel.active_form().title());
    lines.push(Line::from(Span::styled(
        button,
        Style::default()
            .fg(app.theme.selection_fg)
            .bg(app.theme.selection)
            .add_modifier(Modifier::BOLD),
    )));

    f.render_widget(Paragraph::new(lines), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_switch_form_resets_field_and_keeps_values() {
        let mut panel = AuthPanel::new().unwrap();
        panel.handle_key(press(KeyCode::Char('a')));
        panel.handle_key(press(KeyCode::Down));

        panel.switch_form();
        assert_eq!(panel.active_form(), AuthForm::Signup);
        assert_eq!(panel.forms.mark(AuthForm::Login), PanelMark::Previous);
        assert_eq!(panel.missing_fields(), vec!["Full name", "Email", "Password"]);

        panel.switch_form();
        assert_eq!(panel.active_form(), AuthForm::Login);
        assert_eq!(panel.missing_fields(), vec!["Password"]);
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut panel = AuthPanel::new().unwrap();
        panel.handle_key(press(KeyCode::Up));
        panel.paste("hunter2");
        assert_eq!(panel.missing_fields(), vec!["Email"]);
    }
}
