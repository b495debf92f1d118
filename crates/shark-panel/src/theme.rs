//! Color palette and style constants for the control panel.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_LINK: Color = Color::Rgb(80, 140, 200);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 184, 80);

// Status line colors match the web panel rsharkd ships.
pub const C_STATUS_SUCCESS: Color = Color::Rgb(0, 255, 0);
pub const C_STATUS_ERROR: Color = Color::Rgb(255, 0, 0);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}

pub fn style_link() -> Style {
    Style::default()
        .fg(C_LINK)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
