//! PaneChrome — bordered pane with focus styling and an optional badge.

use crate::theme::{
    style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// A badge shown in the top-right of the pane header (e.g. "2 pending").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    // "[N] title"
    let mut title_spans = Vec::new();
    if let Some(key) = number_key {
        title_spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title_spans));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
