// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help: keyboard shortcuts and current theme
// - Notice: a message that must be acknowledged
// - Upload: the DIALux / image dialog

use crate::tui::app::App;
use crate::tui::components::upload_dialog::{self, centered_rect};
use crate::tui::modal::Modal;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Notice { title, message } => render_notice(f, app, title, message),
        Modal::Upload { kind, path } => {
            let area = f.area();
            upload_dialog::render(f, area, app, *kind, path)
        }
    }
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.brand);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Page", header_style)),
        kb("F4", "Switch login / sign up"),
        kb("F5", "Switch chat / study"),
        kb("Tab", "Next area"),
        kb("Shift+Tab", "Previous area"),
        Line::raw(""),
        Line::from(Span::styled("  Uploads", header_style)),
        kb("F2", "Analyze a DIALux report"),
        kb("F3", "Sketch from an image"),
        kb("Enter", "Add typed path / process"),
        kb("Esc", "Close and discard"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("F1", "Toggle this help"),
        kb("q", "Quit (from the logs)"),
        kb("Ctrl+C", "Quit"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme.name.as_str(), key_style),
            Span::styled(format!("  |  up {}s", app.uptime().as_secs()), desc_style),
        ]),
    ]);

    let height = content.lines.len() as u16 + 2;
    let area = centered_rect(44, height, f.area());

    // Clear the area behind the modal
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press F1 or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_notice(f: &mut Frame, app: &App, title: &str, message: &str) {
    let width = 50.min(f.area().width);
    // Rough wrap estimate: message rows plus padding and borders
    let rows = (message.chars().count() as u16 / width.saturating_sub(4).max(1)) + 1;
    let area = centered_rect(width, rows + 4, f.area());

    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(app.theme.foreground),
        )),
    ])
    .wrap(Wrap { trim: true })
    .style(Style::default().bg(app.theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.brand))
            .border_type(app.theme.border_type)
            .title(format!(" {} ", title))
            .title_bottom(Line::from(" Enter: OK ").centered()),
    );

    f.render_widget(paragraph, area);
}
