//! Component trait — the interface every UI panel implements.
//!
//! Components own their view-only state (focus, cursor) and read
//! `PanelState` for everything else. They return `Vec<Action>` and never
//! mutate `PanelState` directly.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::PanelState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event. Returns actions to be dispatched.
    fn handle_key(&mut self, _key: KeyEvent, _state: &PanelState) -> Vec<Action> {
        Vec::new()
    }

    /// True while the component is capturing free text, so single-letter
    /// shortcuts must not fire.
    fn captures_text(&self) -> bool {
        false
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &PanelState);

    /// The minimum height required to render meaningfully.
    fn min_height(&self) -> u16 {
        3
    }
}
