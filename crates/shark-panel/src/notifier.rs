//! Notifier — the single status line every flow reports into.

use ratatui::style::Color;

use crate::theme::{C_STATUS_ERROR, C_STATUS_SUCCESS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Self::Success => C_STATUS_SUCCESS,
            Self::Error => C_STATUS_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

/// Last writer wins. No queue, no expiry.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<StatusMessage>,
}

impl Notifier {
    pub fn set(&mut self, text: impl Into<String>, tone: Tone) {
        self.current = Some(StatusMessage {
            text: text.into(),
            tone,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(text, Tone::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(text, Tone::Error);
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}
