// Candidate table: every column of the sheet, one row per player.
//
// Highlighted row: reverse video (yellow for a pick, cyan for an undo).
// Taken rows: dimmed with a check mark in the marker column.

use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

use draftboard_core::draft::Candidate;
use draftboard_core::protocol::{DisplayOrder, HighlightKind};

use crate::tui::ViewState;

/// Widest a payload column may grow.
const MAX_COLUMN_WIDTH: u16 = 28;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = build_title(state);

    if state.sheet.rows.is_empty() {
        let paragraph = Paragraph::new("  No players loaded.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders (2) and header (1)
    let visible_rows = (area.height as usize).saturating_sub(3).max(1);
    let total = state.sheet.rows.len();
    let offset = clamp_offset(state.scroll_offset, total, visible_rows);
    let selected = state.highlighted_row();

    let header = Row::new(
        std::iter::once(Cell::from(" "))
            .chain(state.sheet.columns.iter().map(|c| Cell::from(c.clone()))),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .sheet
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(i, candidate)| {
            let is_selected = selected == Some(i);
            let is_taken = state.taken.contains(&candidate.name);
            let marker = if is_selected {
                "▶"
            } else if is_taken {
                "✓"
            } else {
                " "
            };
            Row::new(
                std::iter::once(Cell::from(marker))
                    .chain(candidate.fields.iter().map(|f| Cell::from(f.clone()))),
            )
            .style(row_style(is_selected, is_taken, state.highlight_kind))
        })
        .collect();

    let mut widths = vec![Constraint::Length(1)];
    widths.extend(column_widths(&state.sheet.columns, &state.sheet.rows));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(offset);
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

/// Style for a table row.
pub fn row_style(selected: bool, taken: bool, kind: Option<HighlightKind>) -> Style {
    if selected {
        let bg = match kind {
            Some(HighlightKind::Restored) => Color::Cyan,
            _ => Color::Yellow,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if taken {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    }
}

/// Fixed column widths sized to the longest cell, capped at `MAX_COLUMN_WIDTH`.
pub fn column_widths(columns: &[String], rows: &[Candidate]) -> Vec<Constraint> {
    columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let longest = rows
                .iter()
                .filter_map(|r| r.fields.get(i))
                .map(|f| f.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            Constraint::Length((longest as u16).clamp(2, MAX_COLUMN_WIDTH))
        })
        .collect()
}

/// Keep the offset inside the scrollable range.
pub fn clamp_offset(offset: usize, total: usize, visible: usize) -> usize {
    offset.min(total.saturating_sub(visible))
}

fn build_title(state: &ViewState) -> String {
    if state.sheet.category.is_empty() {
        return "Players".to_string();
    }
    let mut title = format!("{} ({})", state.sheet.category, state.sheet.rows.len());
    if state.sheet.order == DisplayOrder::Rank {
        title.push_str(" [by rank]");
    }
    title
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sheet_view;
    use crate::tui::{apply_ui_update, ViewState};
    use draftboard_core::protocol::UiUpdate;

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn row_style_selected_pick_is_yellow() {
        let style = row_style(true, true, Some(HighlightKind::Picked));
        assert_eq!(style.bg, Some(Color::Yellow));
    }

    #[test]
    fn row_style_selected_restore_is_cyan() {
        let style = row_style(true, false, Some(HighlightKind::Restored));
        assert_eq!(style.bg, Some(Color::Cyan));
    }

    #[test]
    fn row_style_taken_is_dimmed() {
        let style = row_style(false, true, None);
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn row_style_plain() {
        assert_eq!(row_style(false, false, None), Style::default());
    }

    #[test]
    fn column_widths_fit_longest_cell() {
        let columns = vec!["PLAYER NAME".to_string(), "RK".to_string()];
        let rows = vec![
            Candidate::new("Ja'Marr Chase", 1.0),
            Candidate::new("Amon-Ra St. Brown", 100.0),
        ];
        let widths = column_widths(&columns, &rows);
        assert_eq!(widths, vec![Constraint::Length(17), Constraint::Length(3)]);
    }

    #[test]
    fn column_widths_are_capped() {
        let columns = vec!["X".to_string()];
        let rows = vec![Candidate::with_fields("A", 1.0, vec!["y".repeat(80)])];
        assert_eq!(
            column_widths(&columns, &rows),
            vec![Constraint::Length(MAX_COLUMN_WIDTH)]
        );
    }

    #[test]
    fn clamp_offset_limits_to_last_page() {
        assert_eq!(clamp_offset(0, 10, 5), 0);
        assert_eq!(clamp_offset(8, 10, 5), 5);
        assert_eq!(clamp_offset(3, 2, 5), 0);
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No players loaded."));
    }

    #[test]
    fn render_shows_rows_and_rank_title() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        let mut view = sheet_view("Overall", &["Bijan Robinson", "Breece Hall"]);
        view.order = DisplayOrder::Rank;
        apply_ui_update(&mut state, UiUpdate::SheetLoaded(Box::new(view)));

        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Overall (2) [by rank]"));
        assert!(text.contains("Bijan Robinson"));
        assert!(text.contains("PLAYER NAME"));
    }

    #[test]
    fn render_many_rows_with_scroll_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let names: Vec<String> = (0..100).map(|i| format!("Player {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::SheetLoaded(Box::new(sheet_view("Overall", &refs))),
        );
        state.scroll_offset = 500;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Player 99"));
    }
}
