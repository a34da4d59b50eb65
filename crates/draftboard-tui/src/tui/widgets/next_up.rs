// Next-up panel: the candidate the next advance would pick.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match state.draft.next_best.as_deref() {
        Some(name) => vec![
            Line::from(Span::styled(
                format!(" {name}"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}/{} available", state.draft.remaining, state.draft.total),
                Style::default().fg(Color::Gray),
            )),
        ],
        None if state.draft.total > 0 => vec![Line::from(Span::styled(
            " Everyone is taken.",
            Style::default().fg(Color::DarkGray),
        ))],
        None => vec![Line::from(Span::styled(
            " --",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Next Up"));
    frame.render_widget(paragraph, area);
}
