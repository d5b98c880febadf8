//! Logs panel component
//!
//! Shows the newest entries of the shared log buffer. Follows the tail
//! until the user scrolls up; End returns to follow mode.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::app::App;
use crate::tui::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

#[derive(Debug, Default)]
pub struct LogsPanel {
    /// Lines scrolled up from the tail (0 = follow)
    offset: usize,
    /// Entry count seen at last render, bounds the offset
    entry_count: usize,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_following(&self) -> bool {
        self.offset == 0
    }

    fn scroll_up(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.entry_count.saturating_sub(1));
    }

    fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Entries visible in a viewport of `height` rows
    fn visible<'a>(&self, entries: &'a [LogEntry], height: usize) -> &'a [LogEntry] {
        let end = entries.len().saturating_sub(self.offset);
        let start = end.saturating_sub(height);
        &entries[start..end]
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.offset = self.entry_count.saturating_sub(1),
            KeyCode::End => self.offset = 0,
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  End:follow  q:quit")
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warning),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App, focused: bool) {
    let height = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.tail(height + app.logs_panel.offset);
    app.logs_panel.entry_count = app.log_buffer.len();

    let items: Vec<ListItem> = app
        .logs_panel
        .visible(&entries, height)
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, &app.theme))
        })
        .collect();

    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.panel_logs
    };
    let title = if app.logs_panel.is_following() {
        " Logs "
    } else {
        " Logs [scroll] "
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use crossterm::event::KeyModifiers;

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| LogEntry {
                timestamp: Local::now(),
                level: LogLevel::Info,
                target: "luxscale".into(),
                message: format!("line {}", i),
            })
            .collect()
    }

    #[test]
    fn test_follow_shows_tail() {
        let panel = LogsPanel::new();
        let all = entries(10);
        let visible = panel.visible(&all, 3);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[2].message, "line 9");
    }

    #[test]
    fn test_scroll_up_is_bounded() {
        let mut panel = LogsPanel::new();
        panel.entry_count = 5;
        for _ in 0..10 {
            panel.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        }
        assert_eq!(panel.offset, 4);
        let all = entries(5);
        assert_eq!(panel.visible(&all, 3)[0].message, "line 0");

        panel.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert!(panel.is_following());
    }
}
