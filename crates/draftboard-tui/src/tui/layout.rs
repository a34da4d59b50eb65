// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------------+------------------+
// | Candidate Table (70%)         | Next Up (4 rows) |
// |                               +------------------+
// |                               | Pick Log (fill)  |
// +-------------------------------+------------------+
// | Notice Bar (1 row)                                |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: category tabs and draft progress.
    pub status_bar: Rect,
    /// Left side of the middle section: the candidate table.
    pub table: Rect,
    /// Right sidebar top: the candidate the next advance would pick.
    pub next_up: Rect,
    /// Right sidebar bottom: picks made so far.
    pub pick_log: Rect,
    /// Last message from the orchestrator.
    pub notice_bar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // middle section
            Constraint::Length(1), // notice bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(vertical[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(2)])
        .split(horizontal[1]);

    AppLayout {
        status_bar: vertical[0],
        table: horizontal[0],
        next_up: sidebar[0],
        pick_log: sidebar[1],
        notice_bar: vertical[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
