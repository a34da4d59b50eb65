// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` built purely from `UiUpdate` messages pushed by
// the orchestrator. Key presses become `UserCommand`s sent back over an mpsc
// channel, or local view changes such as scrolling.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use draftboard_core::protocol::{
    DraftSnapshot, HighlightKind, Notice, SheetView, UiUpdate, UserCommand,
};

use layout::{build_layout, AppLayout};

/// Rows kept above a newly highlighted candidate when scrolling to it.
pub const HIGHLIGHT_CONTEXT_ROWS: usize = 3;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors what the orchestrator has published.
#[derive(Debug, Default)]
pub struct ViewState {
    /// The sheet currently displayed, rows in display order.
    pub sheet: SheetView,
    /// Candidate name -> row position in `sheet.rows`.
    pub row_index: HashMap<String, usize>,
    /// Latest draft summary.
    pub draft: DraftSnapshot,
    /// Names in `draft.picks`, for per-row lookups while rendering.
    pub taken: HashSet<String>,
    /// Candidate selected by the last advance or undo.
    pub highlighted: Option<String>,
    pub highlight_kind: Option<HighlightKind>,
    /// Last status message.
    pub notice: Option<Notice>,
    /// First visible table row.
    pub scroll_offset: usize,
    /// First visible pick log entry.
    pub log_scroll: usize,
    /// Whether the quit confirmation overlay is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    /// Row of the highlighted candidate in the current display order.
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlighted
            .as_ref()
            .and_then(|name| self.row_index.get(name).copied())
    }

    fn set_sheet(&mut self, sheet: SheetView, keep_selection: bool) {
        self.row_index = sheet
            .rows
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        self.sheet = sheet;

        if keep_selection {
            // Re-sorted: keep the selection and bring it back into view.
            if let Some(row) = self.highlighted_row() {
                self.scroll_offset = row.saturating_sub(HIGHLIGHT_CONTEXT_ROWS);
            }
        } else {
            self.highlighted = None;
            self.highlight_kind = None;
            self.scroll_offset = 0;
            self.log_scroll = 0;
        }
    }

    fn set_highlight(&mut self, name: String, kind: HighlightKind) {
        match self.row_index.get(&name) {
            Some(&row) => {
                self.scroll_offset = row.saturating_sub(HIGHLIGHT_CONTEXT_ROWS);
                self.highlighted = Some(name);
                self.highlight_kind = Some(kind);
            }
            None => warn!("Highlight for unknown candidate '{}'", name),
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SheetLoaded(sheet) => state.set_sheet(*sheet, false),
        UiUpdate::SheetReordered(sheet) => state.set_sheet(*sheet, true),
        UiUpdate::Highlight { name, kind } => state.set_highlight(name, kind),
        UiUpdate::Notice(notice) => state.notice = Some(notice),
        UiUpdate::DraftState(snapshot) => {
            state.taken = snapshot.picks.iter().cloned().collect();
            state.draft = snapshot;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::candidates::render(frame, layout.table, state);
    widgets::next_up::render(frame, layout.next_up, state);
    widgets::pick_log::render(frame, layout.pick_log, state);
    widgets::notice_bar::render(frame, layout.notice_bar, state);
    render_help_bar(frame, &layout);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " n:Next best | u:Undo | s:Sort by rank | Tab:Category | j/k:Scroll | q:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input, and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    // ~30fps
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    // Mouse and resize events: the next tick redraws
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
