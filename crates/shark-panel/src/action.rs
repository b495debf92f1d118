//! Action enum — all operator intents.

use ratatui::crossterm::event::KeyEvent;
use shark_proto::protocol::Modulation;

/// Unique identifier for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ConfigForm,
    StreamLinks,
}

/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Form ─────────────────────────────────────────────────────────────────
    Check(Modulation),
    EditFrequency(KeyEvent),

    // ── Requests ─────────────────────────────────────────────────────────────
    Apply,
    Validate,
    Reload,

    // ── Misc ─────────────────────────────────────────────────────────────────
    Focus(ComponentId),
    CopyListenUrl,
    Quit,
}
