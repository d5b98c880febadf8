// Upload dialog overlay
//
//   ┌ Analyze DIALux Report ─────────────────────────┐
//   │ Drop a file here or type its path               │
//   │ Accepted: .pdf .ldt .xlsx                       │
//   │ › /home/me/plans/office.ldt▏                    │
//   │                                                 │
//   │ Name  office.ldt        Size  1.5 KB            │
//   │ Type  DIALux Project    Date  3/14/2025         │
//   │ [thumbnail, image dialog only]                  │
//   │                              [ Process Report ] │
//   └─────────────────────────────────────────────────┘

use crate::tui::app::App;
use crate::upload::{preview::Thumbnail, UploadKind, UploadStub};
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, kind: UploadKind, path: &str) {
    let stub = app.upload(kind);
    let profile = stub.profile();
    let theme = &app.theme;

    let label = |s: &'static str| Span::styled(format!("{:<6}", s), Style::default().fg(theme.muted));
    let value = |s: String| Span::styled(format!("{:<20}", s), Style::default().fg(theme.foreground));

    let extensions: Vec<String> = profile.extensions.iter().map(|e| format!(".{}", e)).collect();
    let mut lines = vec![
        Line::from(Span::styled(
            "Drop a file here or type its path",
            Style::default().fg(theme.foreground),
        )),
        Line::from(Span::styled(
            format!("Accepted: {}", extensions.join(" ")),
            Style::default().fg(theme.muted),
        )),
        Line::from(vec![
            Span::styled("› ", Style::default().fg(theme.highlight)),
            Span::styled(format!("{}▏", path), Style::default().fg(theme.foreground)),
        ]),
        Line::raw(""),
    ];

    if stub.is_loading() {
        lines.push(Line::from(Span::styled(
            format!("{} Loading...", app.spinner_char()),
            Style::default().fg(theme.highlight),
        )));
    } else if let Some(record) = stub.record() {
        lines.push(Line::from(Span::styled(
            "✓ File received",
            Style::default().fg(theme.success),
        )));
        lines.push(Line::from(vec![
            label("Name"),
            value(truncate_to_width(&record.file_name, 18)),
            label("Size"),
            value(record.size_label()),
        ]));
        lines.push(Line::from(vec![
            label("Type"),
            value(record.file_type.to_string()),
            label("Date"),
            value(record.date_label()),
        ]));
    }

    if profile.preview {
        lines.push(Line::raw(""));
        preview_lines(stub, app, &mut lines);
    }

    lines.push(Line::raw(""));
    let button_style = if stub.can_submit() {
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted).bg(theme.brand_soft)
    };
    lines.push(
        Line::from(Span::styled(format!("[ {} ]", stub.submit_label()), button_style))
            .right_aligned(),
    );

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 60.min(area.width);
    let rect = centered_rect(width, height, area);

    f.render_widget(Clear, rect);
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.brand))
                .title(format!(" {} ", profile.title))
                .title_bottom(Line::from(" Enter: add path / process  Esc: close ").centered()),
        );
    f.render_widget(paragraph, rect);
}

fn preview_lines(stub: &UploadStub, app: &App, lines: &mut Vec<Line<'static>>) {
    if let Some(preview) = stub.preview() {
        lines.extend(thumbnail_lines(&preview.thumbnail));
        lines.push(Line::from(Span::styled(
            format!(
                "{} {}×{}  ({} bytes as data URL)",
                preview.format,
                preview.width,
                preview.height,
                preview.data_url.len()
            ),
            Style::default().fg(app.theme.muted),
        )));
    } else if let Some(reason) = stub.preview_error() {
        lines.push(Line::from(Span::styled(
            format!("No preview: {}", reason),
            Style::default().fg(app.theme.warning),
        )));
    } else if stub.record().is_some() {
        lines.push(Line::from(Span::styled(
            "Reading image...",
            Style::default().fg(app.theme.muted),
        )));
    }
}

/// Two pixel rows per terminal row using the upper half block
fn thumbnail_lines(thumb: &Thumbnail) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for y in (0..thumb.height).step_by(2) {
        let spans: Vec<Span> = (0..thumb.width)
            .map(|x| {
                let top = thumb.pixel(x, y).map(rgb).unwrap_or(Color::Reset);
                let bottom = thumb.pixel(x, y + 1).map(rgb).unwrap_or(Color::Reset);
                Span::styled("▀", Style::default().fg(top).bg(bottom))
            })
            .collect();
        out.push(Line::from(spans));
    }
    out
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Calculate centered rect for modal dialog
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_rows_are_halved() {
        let thumb = Thumbnail {
            width: 2,
            height: 3,
            pixels: vec![[255, 0, 0]; 6],
        };
        let lines = thumbnail_lines(&thumb);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        // Odd last row has nothing below it
        assert_eq!(lines[1].spans[0].style.bg, Some(Color::Reset));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 20, area);
        assert_eq!(rect, Rect::new(0, 0, 40, 10));
    }
}
