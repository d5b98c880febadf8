// Theme for the TUI
//
// One palette built around the LuxScale brand red. `use_theme_background`
// decides whether panels paint their own background or leave the
// terminal's default showing through.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Resolved theme ready for use in the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Brand ───────────────────────────────────────────────
    pub brand: Color,
    pub brand_soft: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,

    // ─── Panel States ────────────────────────────────────────
    pub panel_active: Color,
    pub panel_previous: Color,
    pub panel_logs: Color,

    // ─── Feedback ────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub placeholder: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    pub muted: Color,
    pub border_type: BorderType,
}

impl Theme {
    pub fn luxscale(use_theme_background: bool) -> Self {
        Self {
            name: "luxscale".to_string(),
            brand: Color::Rgb(235, 27, 38),
            brand_soft: Color::Rgb(0x7a, 0x1f, 0x24),
            title: Color::Rgb(235, 27, 38),
            border: Color::Rgb(0x4a, 0x4f, 0x5a),
            highlight: Color::Rgb(0xff, 0xc8, 0x57),
            status_bar: Color::Rgb(0xa0, 0xa8, 0xb8),
            panel_active: Color::Rgb(235, 27, 38),
            panel_previous: Color::Rgb(0x6a, 0x70, 0x7c),
            panel_logs: Color::Rgb(0x6a, 0x70, 0x7c),
            success: Color::Rgb(0x4c, 0xc3, 0x8a),
            warning: Color::Rgb(0xff, 0xc8, 0x57),
            error: Color::Rgb(0xff, 0x5f, 0x5f),
            background: if use_theme_background {
                Color::Rgb(0x16, 0x18, 0x1d)
            } else {
                Color::Reset
            },
            foreground: Color::Rgb(0xe6, 0xe8, 0xee),
            placeholder: Color::Rgb(0x80, 0x86, 0x92),
            selection: Color::Rgb(235, 27, 38),
            selection_fg: Color::Rgb(0xff, 0xff, 0xff),
            muted: Color::Rgb(0x80, 0x86, 0x92),
            border_type: BorderType::Rounded,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::luxscale(true)
    }
}
