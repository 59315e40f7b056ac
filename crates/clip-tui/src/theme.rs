//! Color palette and style constants for the clipdeck TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(95, 175, 255);
pub const C_PLAYING: Color = Color::Rgb(92, 200, 130);
pub const C_ERROR: Color = Color::Rgb(255, 85, 85);
pub const C_PENDING: Color = Color::Rgb(255, 190, 90);
pub const C_MUTED: Color = Color::Rgb(78, 78, 94);
pub const C_SEPARATOR: Color = Color::Rgb(44, 44, 56);
pub const C_SECONDARY: Color = Color::Rgb(122, 124, 148);
pub const C_PRIMARY: Color = Color::Rgb(214, 214, 228);
pub const C_SELECTION_BG: Color = Color::Rgb(30, 32, 44);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 44, 56);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(110, 130, 220);
pub const C_FILTER_BG: Color = Color::Rgb(22, 22, 34);
pub const C_FILTER_FG: Color = Color::Rgb(255, 205, 95);
pub const C_BADGE_PLAY: Color = Color::Rgb(92, 200, 130);
pub const C_BADGE_ERR: Color = Color::Rgb(255, 85, 85);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 190, 90);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_cursor_row() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
