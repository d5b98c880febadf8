// Views module - screen-level rendering logic
//
// There is one screen. Its body is laid out by breakpoint:
//
//   Wide     [ Account │ Chat/Study │ Logs ]
//   Normal   [ Account │ Chat/Study ]
//            [ Logs                 ]
//   Compact  [ Account    ]
//            [ Chat/Study ]
//
// Modals and the toast are drawn last, over everything.

mod modal;

use super::app::{App, Focus, Interface};
use super::components::{self, auth_panel::mark_style};
use super::layout::Breakpoint;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Apply theme background to entire frame (respects use_theme_background toggle)
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(f.area());

    components::title_bar::render(f, chunks[0], app);
    render_body(f, chunks[1], app);
    components::status_bar::render(f, chunks[2], app);

    if let Some(modal) = app.modal.clone() {
        modal::render(f, &modal, app);
    }

    if let Some(toast) = &app.toast {
        let area = f.area();
        toast.render(f, area, &app.theme);
    }
}

fn render_body(f: &mut Frame, area: Rect, app: &mut App) {
    let bp = Breakpoint::from_width(area.width);

    let (auth_area, interface_area, logs_area) = match bp {
        Breakpoint::Wide => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(38),
                    Constraint::Min(40),
                    Constraint::Percentage(30),
                ])
                .split(area);
            (cols[0], cols[1], Some(cols[2]))
        }
        Breakpoint::Normal => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(12), Constraint::Length(8)])
                .split(area);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(40)])
                .split(rows[0]);
            (cols[0], cols[1], Some(rows[1]))
        }
        Breakpoint::Compact => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(14), Constraint::Min(8)])
                .split(area);
            (rows[0], rows[1], None)
        }
    };

    components::auth_panel::render(f, auth_area, app, app.focus == Focus::Auth);
    render_interface(f, interface_area, app);

    if let Some(logs_area) = logs_area.filter(|_| bp.shows_logs()) {
        let focused = app.focus == Focus::Logs;
        components::logs_panel::render(f, logs_area, app, focused);
    }
}

/// Chat / study tabs around whichever panel is active
fn render_interface(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Interface;
    let border = if focused {
        app.theme.highlight
    } else {
        app.theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border))
        .title(" Workspace ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let titles: Vec<Line> = app
        .interface
        .members()
        .map(|tab| {
            Line::from(Span::styled(
                tab.title(),
                mark_style(app.interface.mark(tab), app),
            ))
        })
        .collect();
    let selected = app
        .interface
        .members()
        .position(|tab| app.interface.is_active(tab))
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .divider(" │ ")
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, chunks[0]);

    match app.active_interface() {
        Interface::Chat => components::chat_panel::render(f, chunks[1], app, focused),
        Interface::Study => components::study_panel::render(f, chunks[1], app, focused),
    }
}
