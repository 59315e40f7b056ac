//! PaneChrome — bordered pane with focus styling and an optional badge.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_PRIMARY};

/// A badge shown in the top-right of the pane header (e.g. "PLAY", "ERR").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub fn pane_chrome<'a>(title: &'a str, focused: bool, badge: Option<Badge<'a>>) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(Span::styled(title, title_style)));

    if let Some(b) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}
