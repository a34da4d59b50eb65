// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the
// orchestrator, or into local ViewState changes (scrolling, quit prompt).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use draftboard_core::protocol::UserCommand;

use super::ViewState;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key should be forwarded to the
/// orchestrator, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm also reports Release events; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        // Draft actions
        KeyCode::Char('n') | KeyCode::Enter | KeyCode::Char(' ') => Some(UserCommand::Advance),
        KeyCode::Char('u') | KeyCode::Backspace => Some(UserCommand::Undo),
        KeyCode::Char('s') => Some(UserCommand::SortByRank),

        // Category switching
        KeyCode::Tab | KeyCode::Right => Some(UserCommand::NextCategory),
        KeyCode::BackTab | KeyCode::Left => Some(UserCommand::PrevCategory),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            view_state
                .sheet
                .categories
                .get(idx)
                .map(|name| UserCommand::SelectCategory(name.clone()))
        }

        // Table scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            view_state.scroll_offset = 0;
            None
        }

        // Pick log scrolling
        KeyCode::Char('[') => {
            view_state.log_scroll = view_state.log_scroll.saturating_sub(1);
            None
        }
        KeyCode::Char(']') => {
            view_state.log_scroll = view_state.log_scroll.saturating_add(1);
            None
        }

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Quit prompt: `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_sub(lines);
}

/// Scroll down, never past the last row.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let last = view_state.sheet.rows.len().saturating_sub(1);
    view_state.scroll_offset = view_state.scroll_offset.saturating_add(lines).min(last);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
