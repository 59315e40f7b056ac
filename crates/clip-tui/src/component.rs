//! Component trait — the interface every UI panel implements.
//!
//! Components own their view state (cursor, scroll, filter) and render
//! themselves; shared data arrives as a read-only `ControllerState`.
//! They never mutate shared state — anything beyond their own view flows
//! out as `Action`s for the App to dispatch.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::controller::ControllerState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event. Returns actions to be dispatched.
    fn handle_key(&mut self, key: KeyEvent, state: &ControllerState) -> Vec<Action>;

    /// Handle a mouse event within `area`. Returns actions to be dispatched.
    fn handle_mouse(
        &mut self,
        _event: MouseEvent,
        _area: Rect,
        _state: &ControllerState,
    ) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &ControllerState);
}
