//! FilterInput — wraps tui-input for the clip list filter bar.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

pub enum FilterAction {
    Changed(String),
    Closed,
}

pub struct FilterInput {
    input: Input,
    pub active: bool,
    placeholder: &'static str,
}

impl FilterInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder,
        }
    }

    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Esc clears and closes; Enter keeps the query and closes.
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc => {
                self.input = Input::default();
                self.active = false;
                FilterAction::Changed(String::new())
            }
            KeyCode::Enter => {
                self.active = false;
                FilterAction::Closed
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                FilterAction::Changed(self.input.value().to_string())
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(format!("/ {}", self.placeholder), Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                format!("/ {}", &value[scroll..]),
                Style::default().fg(C_FILTER_FG),
            )
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_FILTER_BG));
        frame.render_widget(paragraph, area);

        if self.active {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}
