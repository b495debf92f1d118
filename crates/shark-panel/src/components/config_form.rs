//! ConfigForm — modulation radios, frequency field and the apply button.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use shark_proto::protocol::{DaemonConfig, Modulation};

use crate::action::{Action, ComponentId};
use crate::app_state::PanelState;
use crate::component::Component;
use crate::theme::{
    style_default, style_input, style_muted, style_secondary, style_selected_focused,
    C_BADGE_PENDING,
};
use crate::widgets::pane_chrome::{pane_chrome, Badge};

const FREQUENCY_LABEL: &str = " Frequency  ";
const FREQUENCY_WIDTH: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Am,
    Fm,
    Frequency,
    ApplyButton,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Am, Field::Fm, Field::Frequency, Field::ApplyButton];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct ConfigForm {
    focus: Field,
}

impl ConfigForm {
    pub fn new() -> Self {
        Self { focus: Field::Am }
    }

    fn radio<'a>(&self, state: &PanelState, m: Modulation, field: Field, focused: bool) -> Span<'a> {
        let mark = if state.form.is_checked(m) { "•" } else { " " };
        let style = if focused && self.focus == field {
            style_selected_focused()
        } else {
            style_default()
        };
        Span::styled(format!("({}) {}", mark, m), style)
    }
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ConfigForm {
    fn id(&self) -> ComponentId {
        ComponentId::ConfigForm
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &PanelState) -> Vec<Action> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        match self.focus {
            Field::Am | Field::Fm => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let m = if self.focus == Field::Am {
                        Modulation::Am
                    } else {
                        Modulation::Fm
                    };
                    vec![Action::Check(m)]
                }
                KeyCode::Left => {
                    self.focus = Field::Am;
                    Vec::new()
                }
                KeyCode::Right => {
                    self.focus = Field::Fm;
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Field::Frequency => match key.code {
                KeyCode::Enter => vec![Action::Apply],
                _ => vec![Action::EditFrequency(key)],
            },
            Field::ApplyButton => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => vec![Action::Apply],
                _ => Vec::new(),
            },
        }
    }

    fn captures_text(&self) -> bool {
        self.focus == Field::Frequency
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &PanelState) {
        let pending = format!("{} pending", state.in_flight);
        let badge = (state.in_flight > 0).then(|| Badge {
            text: pending.as_str(),
            color: C_BADGE_PENDING,
        });
        let block = pane_chrome("Transmitter", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input = state.form.frequency_input();
        let field_width = FREQUENCY_WIDTH as usize;
        let scroll = input.visual_scroll(field_width);
        let visible: String = input.value().chars().skip(scroll).take(field_width).collect();
        let freq_style = if focused && self.focus == Field::Frequency {
            style_input()
        } else {
            style_default()
        };
        let button_style = if focused && self.focus == Field::ApplyButton {
            style_selected_focused()
        } else {
            style_secondary()
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw(" "),
                self.radio(state, Modulation::Am, Field::Am, focused),
                Span::raw("   "),
                self.radio(state, Modulation::Fm, Field::Fm, focused),
            ]),
            Line::from(vec![
                Span::styled(FREQUENCY_LABEL, style_secondary()),
                Span::styled(format!("{:<width$}", visible, width = field_width), freq_style),
            ]),
            Line::from(vec![Span::raw(" "), Span::styled("[ Apply ]", button_style)]),
        ];
        if let Some(cfg) = &state.loaded {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(led_summary(cfg), style_muted())));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if focused && self.focus == Field::Frequency && inner.height > 1 {
            let offset = (input.visual_cursor().saturating_sub(scroll) as u16).min(FREQUENCY_WIDTH);
            let x = inner.x + FREQUENCY_LABEL.len() as u16 + offset;
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y + 1));
        }
    }

    fn min_height(&self) -> u16 {
        7
    }
}

fn led_summary(cfg: &DaemonConfig) -> String {
    let level = |v: Option<u8>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    let red = match cfg.red_led {
        Some(true) => "on",
        Some(false) => "off",
        None => "-",
    };
    format!(
        " blue LED {} · pulse {} · red LED {}",
        level(cfg.blue_led_intensity),
        level(cfg.blue_led_pulse_rate),
        red
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_space_on_radio_checks_it() {
        let state = PanelState::default();
        let mut form = ConfigForm::new();
        let actions = form.handle_key(key(KeyCode::Char(' ')), &state);
        assert!(matches!(actions.as_slice(), [Action::Check(Modulation::Am)]));

        form.handle_key(key(KeyCode::Right), &state);
        let actions = form.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::Check(Modulation::Fm)]));
    }

    #[test]
    fn test_frequency_field_captures_text() {
        let state = PanelState::default();
        let mut form = ConfigForm::new();
        form.handle_key(key(KeyCode::Tab), &state);
        assert!(!form.captures_text());
        form.handle_key(key(KeyCode::Tab), &state);
        assert!(form.captures_text());

        let actions = form.handle_key(key(KeyCode::Char('q')), &state);
        assert!(matches!(actions.as_slice(), [Action::EditFrequency(_)]));
        let actions = form.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::Apply]));
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let state = PanelState::default();
        let mut form = ConfigForm::new();
        form.handle_key(key(KeyCode::BackTab), &state);
        let actions = form.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::Apply]));
        form.handle_key(key(KeyCode::Tab), &state);
        assert_eq!(form.focus, Field::Am);
    }

    #[test]
    fn test_led_summary() {
        let cfg = DaemonConfig::default();
        assert_eq!(led_summary(&cfg), " blue LED 127 · pulse 0 · red LED off");
    }
}
