// Status bar component
//
// Key hints for whatever has focus, plus the global bindings. Narrow
// terminals get the short form.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let focus_hint = app.focus_hint();
    let text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ {} │ Tab:focus  F1:help  F2:DIALux  F3:image  F4:login/signup  F5:chat/study  Ctrl+C:quit",
            app.focus.label(),
            focus_hint
        )
    } else {
        format!(" {} │ {} │ Tab  F1-F5  ^C", app.focus.label(), focus_hint)
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
