// Status bar widget: category tabs and draft progress.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Layout: [category tabs] | Picks n | Left r/t
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = category_spans(&state.sheet.categories, &state.sheet.category);

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        progress_text(state),
        Style::default().fg(Color::White),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// One "[n:Name]" span per category, the active one highlighted.
pub fn category_spans(categories: &[String], active: &str) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for (i, name) in categories.iter().enumerate() {
        let style = if name == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let label = if i < 9 {
            format!("[{}:{}]", i + 1, name)
        } else {
            format!("[{name}]")
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn progress_text(state: &ViewState) -> String {
    format!(
        "Picks {} | Left {}/{}",
        state.draft.picks.len(),
        state.draft.remaining,
        state.draft.total
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
