// Study panel - renders the two wizard steps
//
// Both steps are drawn as a step indicator plus the active step's body.
// The step that was just left is shown dimmed in the indicator.

use super::auth_panel::mark_style;
use crate::tui::app::App;
use crate::wizard::{DimensionField, WizardStep, APPLICATIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let wizard = &app.wizard;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let mut indicator = Vec::new();
    for (i, step) in wizard.steps().members().enumerate() {
        if i > 0 {
            indicator.push(Span::styled("  ›  ", Style::default().fg(app.theme.muted)));
        }
        indicator.push(Span::styled(
            format!("{}. {}", i + 1, step.title()),
            mark_style(wizard.steps().mark(step), app),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(indicator)), chunks[0]);

    match wizard.step() {
        WizardStep::DefineArea => render_define_area(f, chunks[1], app, focused),
        WizardStep::ChooseApplication => render_choose_application(f, chunks[1], app, focused),
    }
}

fn render_define_area(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let wizard = &app.wizard;
    let mut lines = vec![
        Line::from(Span::styled(
            "Enter the room dimensions (at least one).",
            Style::default().fg(app.theme.muted),
        )),
        Line::raw(""),
    ];

    for field in DimensionField::ALL {
        let current = focused && wizard.focused() == field;
        let marker = if current { "› " } else { "  " };
        let mut value = wizard.dimension(field).to_string();
        if current {
            value.push('▏');
        }
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight)),
            Span::styled(
                format!("{:<12}", field.label()),
                Style::default().fg(if current {
                    app.theme.highlight
                } else {
                    app.theme.foreground
                }),
            ),
            Span::styled(value, Style::default().fg(app.theme.foreground)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "[ Continue ]",
        button_style(app),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_choose_application(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let wizard = &app.wizard;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "What kind of space is this?",
            Style::default().fg(app.theme.muted),
        )),
        chunks[0],
    );

    let items: Vec<ListItem> = APPLICATIONS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let selected = wizard.is_selected(i);
            let radio = if selected { "●" } else { "○" };
            let mut style = if selected {
                Style::default()
                    .fg(app.theme.brand)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.foreground)
            };
            if focused && wizard.cursor() == i {
                style = style.bg(app.theme.brand_soft);
            }
            ListItem::new(format!(" {} {}", radio, label)).style(style)
        })
        .collect();
    f.render_widget(List::new(items), chunks[1]);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[ Back ]", Style::default().fg(app.theme.muted)),
            Span::raw("  "),
            Span::styled("[ Continue ]", button_style(app)),
        ])),
        chunks[2],
    );
}

fn button_style(app: &App) -> Style {
    Style::default()
        .fg(app.theme.selection_fg)
        .bg(app.theme.selection)
        .add_modifier(Modifier::BOLD)
}
