//! Editable form state: two exclusive modulation radios and a free-text
//! frequency field.

use ratatui::crossterm::event::{Event, KeyEvent};
use tui_input::{backend::crossterm::EventHandler, Input};

use shark_proto::protocol::{ApplyForm, DaemonConfig, Modulation};

#[derive(Debug, Default)]
pub struct FormState {
    am: bool,
    fm: bool,
    frequency: Input,
}

impl FormState {
    /// Mirror the daemon's configuration into the controls. An unknown
    /// modulation leaves both radios as they were; the frequency text is
    /// taken verbatim.
    pub fn apply_config(&mut self, cfg: &DaemonConfig) {
        if let Some(m) = cfg.modulation() {
            self.check(m);
        }
        self.set_frequency(&cfg.frequency);
    }

    /// Check one radio and clear the other.
    pub fn check(&mut self, modulation: Modulation) {
        self.am = modulation == Modulation::Am;
        self.fm = modulation == Modulation::Fm;
    }

    pub fn is_checked(&self, modulation: Modulation) -> bool {
        match modulation {
            Modulation::Am => self.am,
            Modulation::Fm => self.fm,
        }
    }

    /// The checked radio, if any.
    pub fn checked(&self) -> Option<Modulation> {
        if self.am {
            Some(Modulation::Am)
        } else if self.fm {
            Some(Modulation::Fm)
        } else {
            None
        }
    }

    pub fn frequency(&self) -> &str {
        self.frequency.value()
    }

    pub fn set_frequency(&mut self, value: &str) {
        self.frequency = Input::new(value.to_string());
    }

    /// Feed a keypress to the frequency field. No filtering: whatever the
    /// operator types is what gets sent.
    pub fn edit_frequency(&mut self, key: KeyEvent) {
        self.frequency.handle_event(&Event::Key(key));
    }

    pub fn frequency_input(&self) -> &Input {
        &self.frequency
    }

    /// Snapshot the controls for `POST /config/apply`.
    pub fn submission(&self) -> ApplyForm {
        ApplyForm {
            modulation: self.checked(),
            frequency: self.frequency().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn cfg(modulation: &str, frequency: &str) -> DaemonConfig {
        DaemonConfig {
            modulation: modulation.to_string(),
            frequency: frequency.to_string(),
            blue_led_intensity: None,
            blue_led_pulse_rate: None,
            red_led: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_any_case_of_am_checks_am_only() {
        for raw in ["am", "AM", "Am", "aM"] {
            let mut form = FormState::default();
            form.check(Modulation::Fm);
            form.apply_config(&cfg(raw, "600"));
            assert!(form.is_checked(Modulation::Am), "{}", raw);
            assert!(!form.is_checked(Modulation::Fm), "{}", raw);
        }
    }

    #[test]
    fn test_any_case_of_fm_checks_fm_only() {
        for raw in ["fm", "FM", "fM"] {
            let mut form = FormState::default();
            form.check(Modulation::Am);
            form.apply_config(&cfg(raw, "88.1"));
            assert!(form.is_checked(Modulation::Fm));
            assert!(!form.is_checked(Modulation::Am));
        }
    }

    #[test]
    fn test_unknown_modulation_keeps_prior_radios() {
        let mut form = FormState::default();
        form.apply_config(&cfg("dab", "1"));
        assert_eq!(form.checked(), None);

        form.check(Modulation::Am);
        form.apply_config(&cfg("ssb", "2"));
        assert!(form.is_checked(Modulation::Am));
        assert!(!form.is_checked(Modulation::Fm));
        assert_eq!(form.frequency(), "2");
    }

    #[test]
    fn test_loaded_frequency_is_submitted_unchanged() {
        for freq in ["88.5", "0101.70", "1e2", " 540 ", ""] {
            let mut form = FormState::default();
            form.apply_config(&cfg("FM", freq));
            assert_eq!(form.submission().frequency, freq);
        }
    }

    #[test]
    fn test_no_radio_checked_submits_without_modulation() {
        let mut form = FormState::default();
        form.set_frequency("99.1");
        let sub = form.submission();
        assert_eq!(sub.modulation, None);
        assert_eq!(sub.frequency, "99.1");
    }

    #[test]
    fn test_typing_edits_frequency() {
        let mut form = FormState::default();
        form.set_frequency("88");
        form.edit_frequency(key(KeyCode::Char('.')));
        form.edit_frequency(key(KeyCode::Char('7')));
        assert_eq!(form.frequency(), "88.7");
        form.edit_frequency(key(KeyCode::Backspace));
        assert_eq!(form.frequency(), "88.");
    }
}
