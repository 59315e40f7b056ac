//! Header component — app name, current clip title, phase badge.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    component::Component,
    controller::{ControllerState, Phase},
    theme::{style_muted, style_secondary, C_ACCENT, C_BADGE_ERR, C_BADGE_PENDING, C_PLAYING,
        C_PRIMARY},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    fn badge_span(phase: Phase) -> Option<Span<'static>> {
        let label = phase.badge_label()?;
        let color = match phase {
            Phase::Playing => C_PLAYING,
            Phase::CatalogError | Phase::ResolveError => C_BADGE_ERR,
            _ => C_BADGE_PENDING,
        };
        Some(Span::styled(
            format!(" {} ", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &ControllerState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &ControllerState) {
        let title = state.selected_name.as_deref().unwrap_or("—");

        let mut spans = vec![
            Span::styled(
                " clipdeck ",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", style_muted()),
            Span::styled(title, Style::default().fg(C_PRIMARY)),
        ];
        if let Some(source) = state.player_source.as_deref() {
            spans.push(Span::styled("  ", style_muted()));
            spans.push(Span::styled(source.to_string(), style_secondary()));
        }
        if let Some(badge) = Self::badge_span(state.phase) {
            spans.push(Span::raw(" "));
            spans.push(badge);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
