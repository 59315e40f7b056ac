//! ClipList component — the rendered catalog, one row per clip.

use clip_proto::catalog::ClipEntry;
use clip_proto::format::format_size;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    action::{Action, ComponentId},
    component::Component,
    controller::{ControllerState, Phase},
    theme::{
        style_cursor_row, style_default, style_muted, style_secondary, C_ACCENT, C_BADGE_ERR,
        C_BADGE_PENDING, C_BADGE_PLAY, C_PLAYING,
    },
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub struct ClipList {
    list: ScrollableList<ClipEntry>,
    filter_input: FilterInput,
}

impl ClipList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|clip: &ClipEntry, q: &str| {
                let q = q.to_lowercase();
                clip.name.to_lowercase().contains(&q) || clip.key.to_lowercase().contains(&q)
            }),
            filter_input: FilterInput::new("name or key…"),
        }
    }

    /// Re-sync the rows from the controller's catalog.  Called whenever
    /// the catalog is replaced (or cleared for a load in flight).
    pub fn sync_catalog(&mut self, state: &ControllerState) {
        self.list.set_items(state.clips().to_vec());
    }

    pub fn filter_active(&self) -> bool {
        self.filter_input.active
    }

    fn activate_cursor(&self) -> Vec<Action> {
        match self.list.cursor_item() {
            Some(clip) => vec![Action::Select(clip.clone())],
            None => Vec::new(),
        }
    }

    /// Rows reserved below the list for the filter bar.
    fn filter_rows(&self) -> u16 {
        if self.filter_input.active || !self.filter_input.is_empty() {
            1
        } else {
            0
        }
    }

    fn badge(phase: Phase) -> Option<Badge<'static>> {
        let color = match phase {
            Phase::CatalogLoading | Phase::Resolving => C_BADGE_PENDING,
            Phase::CatalogError | Phase::ResolveError => C_BADGE_ERR,
            Phase::Playing => C_BADGE_PLAY,
            Phase::Idle | Phase::CatalogLoaded => return None,
        };
        phase.badge_label().map(|text| Badge { text, color })
    }

    fn row_line<'a>(&self, clip: &'a ClipEntry, width: usize, state: &ControllerState) -> Line<'a> {
        let selected = state.is_selected(&clip.key);
        let marker = if selected { "▶ " } else { "  " };
        let size = format_size(clip.size);

        // marker + name ... key size
        let size_w = size.width();
        let key_budget = width.saturating_sub(2 + size_w + 2) / 2;
        let key = truncate_to_width(&clip.key, key_budget);
        let key_w = key.width();
        let name_budget = width.saturating_sub(2 + key_w + 1 + size_w + 1);
        let name = truncate_to_width(&clip.name, name_budget);
        let pad = width
            .saturating_sub(2 + name.width() + key_w + 1 + size_w)
            .max(1);

        let name_style = if selected {
            Style::default().fg(C_PLAYING)
        } else {
            style_default()
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(C_ACCENT)),
            Span::styled(name, name_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(key, style_muted()),
            Span::raw(" "),
            Span::styled(size, style_secondary()),
        ])
    }
}

/// Truncate to a display width, appending `…` when something was cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if w + cw + 1 > max {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push('…');
    out
}

impl Component for ClipList {
    fn id(&self) -> ComponentId {
        ComponentId::ClipList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &ControllerState) -> Vec<Action> {
        if self.filter_input.active {
            match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => self.list.set_filter(&q),
                FilterAction::Closed => {}
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.cursor_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.cursor_down(1),
            KeyCode::PageUp => self.list.cursor_up(10),
            KeyCode::PageDown => self.list.cursor_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.cursor_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.cursor_last(),
            KeyCode::Char('/') => self.filter_input.open(),
            KeyCode::Enter => return self.activate_cursor(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse(
        &mut self,
        event: MouseEvent,
        area: Rect,
        _state: &ControllerState,
    ) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.cursor_up(3),
            MouseEventKind::ScrollDown => self.list.cursor_down(3),
            MouseEventKind::Down(_) => {
                // Rows start inside the border.
                let top = area.y.saturating_add(1);
                if event.row >= top {
                    let row = (event.row - top) as usize;
                    if self.list.handle_click(row) {
                        return self.activate_cursor();
                    }
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &ControllerState) {
        let title = format!(" clips {}/{} ", self.list.len(), self.list.total_len());
        let block = pane_chrome(&title, focused, Self::badge(state.phase));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let filter_rows = self.filter_rows();
        let list_height = inner.height.saturating_sub(filter_rows) as usize;
        self.list.ensure_visible(list_height);

        let width = inner.width as usize;
        let items: Vec<ListItem> = self
            .list
            .visible_items(list_height)
            .into_iter()
            .enumerate()
            .map(|(row, (_, clip))| {
                let line = self.row_line(clip, width, state);
                let on_cursor =
                    self.list.scroll_offset + row == self.list.cursor && !self.list.is_empty();
                let item = ListItem::new(line);
                if on_cursor && focused {
                    item.style(style_cursor_row())
                } else {
                    item
                }
            })
            .collect();

        if items.is_empty() && state.catalog.is_some() {
            let empty = List::new([ListItem::new(Span::styled(
                "  (no clips)",
                style_muted(),
            ))]);
            frame.render_widget(
                empty,
                Rect {
                    height: inner.height.saturating_sub(filter_rows),
                    ..inner
                },
            );
        } else {
            frame.render_widget(
                List::new(items),
                Rect {
                    height: inner.height.saturating_sub(filter_rows),
                    ..inner
                },
            );
        }

        if filter_rows > 0 {
            let filter_area = Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            };
            self.filter_input.draw(frame, filter_area);
        }
    }
}
