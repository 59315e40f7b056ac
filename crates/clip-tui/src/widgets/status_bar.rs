//! Status bar — the single status slot plus a keybindings footer.
//!
//! The status line is a last-write-wins slot, not a log: it renders
//! whatever message the controller currently holds, colour-coded by
//! severity, with a phase dot on the left.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::controller::{Phase, Severity, StatusLine};
use crate::theme::{C_ERROR, C_MUTED, C_PENDING, C_PLAYING, C_SECONDARY, C_SEPARATOR};

fn phase_dot(phase: Phase) -> Span<'static> {
    let color = match phase {
        Phase::Playing => C_PLAYING,
        Phase::CatalogLoading | Phase::Resolving => C_PENDING,
        Phase::CatalogError | Phase::ResolveError => C_ERROR,
        Phase::Idle | Phase::CatalogLoaded => C_MUTED,
    };
    Span::styled("●", Style::default().fg(color))
}

/// Draw the status slot: phase dot + current message.
pub fn draw_status_bar(frame: &mut Frame, area: Rect, status: &StatusLine, phase: Phase) {
    let message_style = match status.severity {
        Severity::Info => Style::default().fg(C_SECONDARY),
        Severity::Error => Style::default().fg(C_ERROR),
    };

    let line = Line::from(vec![
        phase_dot(phase),
        Span::raw(" "),
        Span::styled(status.message.clone(), message_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, filter_active: bool) {
    let (label, keys) = if filter_active {
        ("FILTER", " type to filter  Enter keep  Esc clear+close")
    } else {
        (
            "CLIPS",
            " ↑↓/jk move  Enter play  r reload  / filter  q quit",
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(C_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
