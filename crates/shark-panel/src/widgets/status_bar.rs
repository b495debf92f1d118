//! Status bar — the Notifier's status line and the keybindings footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::notifier::StatusMessage;
use crate::theme::{C_MUTED, C_SEPARATOR};

/// Draw the status line: the current message in its tone's color, or
/// nothing at all before the first completion.
pub fn draw_status_line(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let line = match status {
        Some(msg) => Line::from(Span::styled(
            format!(" {}", msg.text),
            Style::default()
                .fg(msg.tone.color())
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, editing: bool) {
    let keys = if editing {
        " type frequency  Enter apply  Tab next  Ctrl-S apply  Ctrl-C quit"
    } else {
        " 1/2 pane  Tab/↑↓ move  Space check  Enter select  a apply  v validate  r reload  y copy link  q quit"
    };
    let line = Line::from(Span::styled(keys, Style::default().fg(C_MUTED)));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{Notifier, Tone};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_status_line_uses_tone_color() {
        let mut notifier = Notifier::default();
        notifier.error("bad frequency");

        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_status_line(f, area, notifier.current())
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..20)
            .map(|x| buffer.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(text.trim_end(), " bad frequency");
        assert_eq!(buffer.cell((1, 0)).unwrap().fg, Tone::Error.color());
    }
}
