// Chat panel - the input box with the typewriter placeholder
//
// While the input is empty the rotator's current text shows as the
// placeholder. Messages are never sent; Enter just clears the box.

use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Shown when the typewriter could not be built
const STATIC_PLACEHOLDER: &str = "Ask about your lighting project...";

pub fn render(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let intro = vec![
        Line::from(Span::styled(
            "Lighting design, simplified.",
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Describe a space and LuxScale suggests fixtures, lux levels and layouts.",
            Style::default().fg(app.theme.muted),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("F2 ", Style::default().fg(app.theme.highlight)),
            Span::styled("Analyze a DIALux report   ", Style::default().fg(app.theme.muted)),
            Span::styled("F3 ", Style::default().fg(app.theme.highlight)),
            Span::styled("Sketch from an image", Style::default().fg(app.theme.muted)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(intro).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let line = if app.chat_input.is_empty() {
        let placeholder = match &app.rotator {
            Some(rotator) => rotator.placeholder(),
            None => STATIC_PLACEHOLDER,
        };
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(app.theme.highlight)));
        }
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(app.theme.placeholder)
                .add_modifier(Modifier::ITALIC),
        ));
        Line::from(spans)
    } else {
        let mut text = app.chat_input.display();
        if focused {
            text.push('▏');
        }
        Line::from(Span::styled(text, Style::default().fg(app.theme.foreground)))
    };

    let border = if focused {
        app.theme.highlight
    } else {
        app.theme.border
    };
    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Message "),
    );
    f.render_widget(input, chunks[1]);
}
