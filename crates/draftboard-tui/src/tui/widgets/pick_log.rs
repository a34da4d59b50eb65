// Pick log widget: picks made in the current category, newest first.
//
// Each entry: "#{n} {name}"

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let picks = &state.draft.picks;

    if picks.is_empty() {
        let paragraph = Paragraph::new("  No picks yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Picks"));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders take two rows
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = picks.len();
    let scroll_offset = state.log_scroll.min(total.saturating_sub(visible_rows));

    let newest = state.highlighted.as_deref();
    let items: Vec<ListItem> = picks
        .iter()
        .enumerate()
        .rev()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|(i, name)| {
            let color = if i + 1 == total && newest == Some(name.as_str()) {
                Color::Yellow
            } else {
                Color::White
            };
            ListItem::new(Line::from(Span::styled(
                format_pick(i + 1, name),
                Style::default().fg(color),
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Picks ({total})")),
    );
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Format one pick log entry.
pub fn format_pick(number: usize, name: &str) -> String {
    format!("#{number} {name}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
