//! StreamPanel — listen links discovered from the Icecast status endpoint.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::PanelState;
use crate::component::Component;
use crate::theme::{style_link, style_muted, style_secondary};
use crate::widgets::pane_chrome::pane_chrome;

pub struct StreamPanel;

impl StreamPanel {
    pub fn new() -> Self {
        Self
    }

    /// "Listen", a line break, then "m3u", for every entry in the container.
    pub fn lines(state: &PanelState) -> Vec<Line<'static>> {
        if state.links.is_empty() {
            return vec![Line::from(Span::styled(" no stream yet", style_muted()))];
        }
        let mut lines = Vec::with_capacity(state.links.len() * 2);
        for links in &state.links {
            lines.push(Line::from(vec![
                Span::styled(" Listen  ", style_secondary()),
                Span::styled(links.listen.clone(), style_link()),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" m3u     ", style_secondary()),
                Span::styled(links.m3u.clone(), style_link()),
            ]));
        }
        lines
    }
}

impl Default for StreamPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StreamPanel {
    fn id(&self) -> ComponentId {
        ComponentId::StreamLinks
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &PanelState) -> Vec<Action> {
        match key.code {
            KeyCode::Enter => vec![Action::CopyListenUrl],
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &PanelState) {
        let block = pane_chrome("Stream", Some('2'), focused, None);
        let paragraph = Paragraph::new(Self::lines(state))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn min_height(&self) -> u16 {
        4
    }
}
