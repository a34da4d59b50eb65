// Notice bar: the latest informational or error message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftboard_core::protocol::NoticeLevel;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = match &state.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(level_color(notice.level)),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Gray,
        NoticeLevel::Error => Color::Red,
    }
}
