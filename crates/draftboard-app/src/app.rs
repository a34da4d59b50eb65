// Application state and the command loop.
//
// The loop receives `UserCommand`s from the view, applies them to the
// `AppState`, and pushes the resulting `UiUpdate`s back. All draft mutation
// happens here, on a single task.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use draftboard_core::draft::{format_rank, DraftTracker, Pick};
use draftboard_core::protocol::{
    DisplayOrder, DraftSnapshot, HighlightKind, Notice, SheetView, UiUpdate, UserCommand,
    EXHAUSTED_NOTICE, NOTHING_TO_UNDO_NOTICE,
};
use draftboard_core::sheet::{Sheet, SheetSource};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Orchestrator state: the data source, the loaded sheet, and its tracker.
pub struct AppState {
    source: Box<dyn SheetSource + Send>,
    sheet: Option<Sheet>,
    tracker: DraftTracker,
    order: DisplayOrder,
}

impl AppState {
    pub fn new(source: Box<dyn SheetSource + Send>) -> Self {
        AppState {
            source,
            sheet: None,
            tracker: DraftTracker::default(),
            order: DisplayOrder::File,
        }
    }

    /// Load the first category, if the workbook has any.
    pub fn start(&mut self) -> Vec<UiUpdate> {
        match self.source.categories().first().cloned() {
            Some(first) => self.select_category(&first),
            None => {
                warn!("Workbook has no sheets");
                vec![UiUpdate::Notice(Notice::error("Workbook contains no sheets."))]
            }
        }
    }

    /// Apply a single command and return the updates for the view.
    pub fn handle_command(&mut self, cmd: UserCommand) -> Vec<UiUpdate> {
        match cmd {
            UserCommand::SelectCategory(category) => self.select_category(&category),
            UserCommand::NextCategory => self.step_category(1),
            UserCommand::PrevCategory => self.step_category(-1),
            UserCommand::SortByRank => self.sort_by_rank(),
            UserCommand::Advance => self.advance(),
            UserCommand::Undo => self.undo(),
            // Handled by the loop
            UserCommand::Quit => Vec::new(),
        }
    }

    /// Load `category` and reset the draft state for it.
    ///
    /// On a load failure the previous sheet and draft state are kept as-is.
    pub fn select_category(&mut self, category: &str) -> Vec<UiUpdate> {
        let sheet = match self.source.load(category) {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("Failed to load sheet '{}': {}", category, e);
                return vec![UiUpdate::Notice(Notice::error(format!(
                    "Failed to load sheet: {e}"
                )))];
            }
        };

        info!(
            "Switched to category '{}' ({} players)",
            sheet.category,
            sheet.len()
        );
        self.tracker.reset(sheet.ranked().clone());
        self.order = DisplayOrder::File;
        self.sheet = Some(sheet);

        let mut updates = self.sheet_updates(UiUpdate::SheetLoaded);
        updates.push(UiUpdate::Notice(Notice::info(format!(
            "Sheet loaded: {category}"
        ))));
        updates
    }

    /// Show the current sheet in rank order without touching draft state.
    pub fn sort_by_rank(&mut self) -> Vec<UiUpdate> {
        let Some(category) = self.current_category().map(str::to_string) else {
            return vec![UiUpdate::Notice(Notice::info("No sheet loaded."))];
        };
        self.order = DisplayOrder::Rank;
        info!("Sorted '{}' by rank", category);

        let mut updates = self.sheet_updates(UiUpdate::SheetReordered);
        updates.push(UiUpdate::Notice(Notice::info(format!(
            "Sorted by rank: {category}"
        ))));
        updates
    }

    pub fn advance(&mut self) -> Vec<UiUpdate> {
        match self.tracker.advance() {
            Some(pick) => self.pick_updates(pick, HighlightKind::Picked),
            None => {
                debug!("advance: no available candidates");
                vec![UiUpdate::Notice(Notice::info(EXHAUSTED_NOTICE))]
            }
        }
    }

    pub fn undo(&mut self) -> Vec<UiUpdate> {
        match self.tracker.undo() {
            Some(pick) => self.pick_updates(pick, HighlightKind::Restored),
            None => {
                debug!("undo: history empty");
                vec![UiUpdate::Notice(Notice::info(NOTHING_TO_UNDO_NOTICE))]
            }
        }
    }

    pub fn tracker(&self) -> &DraftTracker {
        &self.tracker
    }

    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    pub fn order(&self) -> DisplayOrder {
        self.order
    }

    pub fn current_category(&self) -> Option<&str> {
        self.sheet.as_ref().map(|s| s.category.as_str())
    }

    /// Build the table contents for the current sheet and display order.
    pub fn sheet_view(&self) -> Option<SheetView> {
        let sheet = self.sheet.as_ref()?;
        let rows = match self.order {
            DisplayOrder::File => sheet.candidates.clone(),
            DisplayOrder::Rank => sheet.ranked().as_slice().to_vec(),
        };
        Some(SheetView {
            category: sheet.category.clone(),
            categories: self.source.categories().to_vec(),
            columns: sheet.columns.clone(),
            rows,
            order: self.order,
        })
    }

    pub fn draft_snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            cursor: self.tracker.cursor(),
            picks: self.tracker.picks().map(|c| c.name.clone()).collect(),
            remaining: self.tracker.remaining(),
            total: self.tracker.list().len(),
            next_best: self.tracker.peek().map(|c| c.name.clone()),
        }
    }

    fn sheet_updates(&self, wrap: fn(Box<SheetView>) -> UiUpdate) -> Vec<UiUpdate> {
        let mut updates = Vec::with_capacity(3);
        if let Some(view) = self.sheet_view() {
            updates.push(wrap(Box::new(view)));
        }
        updates.push(UiUpdate::DraftState(self.draft_snapshot()));
        updates
    }

    fn pick_updates(&self, pick: Pick, kind: HighlightKind) -> Vec<UiUpdate> {
        let verb = match kind {
            HighlightKind::Picked => "Next best",
            HighlightKind::Restored => "Restored",
        };
        let text = format!(
            "{verb}: {} (rank {})",
            pick.candidate.name,
            format_rank(pick.candidate.rank)
        );
        vec![
            UiUpdate::Highlight {
                name: pick.candidate.name,
                kind,
            },
            UiUpdate::DraftState(self.draft_snapshot()),
            UiUpdate::Notice(Notice::info(text)),
        ]
    }

    fn step_category(&mut self, step: isize) -> Vec<UiUpdate> {
        let categories = self.source.categories();
        if categories.is_empty() {
            return vec![UiUpdate::Notice(Notice::error("Workbook contains no sheets."))];
        }
        let len = categories.len() as isize;
        let next = match self
            .current_category()
            .and_then(|c| categories.iter().position(|x| x == c))
        {
            Some(i) => (i as isize + step).rem_euclid(len) as usize,
            None => 0,
        };
        let category = categories[next].clone();
        self.select_category(&category)
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator loop until `Quit` arrives or the command channel
/// closes.
///
/// Loads the first category before waiting for commands.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    if !publish(&ui_tx, state.start()).await {
        info!("UI channel closed before startup finished");
        return Ok(());
    }

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == UserCommand::Quit {
            info!("Quit command received, shutting down");
            break;
        }
        debug!("Command: {:?}", cmd);
        let updates = state.handle_command(cmd);
        if !publish(&ui_tx, updates).await {
            info!("UI channel closed, shutting down");
            break;
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Send updates in order. Returns false once the receiver is gone.
async fn publish(ui_tx: &mpsc::Sender<UiUpdate>, updates: Vec<UiUpdate>) -> bool {
    for update in updates {
        if ui_tx.send(update).await.is_err() {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use draftboard_core::draft::Candidate;
    use draftboard_core::protocol::NoticeLevel;
    use draftboard_core::sheet::SheetError;

    /// In-memory workbook. Categories listed without a sheet fail to load.
    struct MemorySource {
        categories: Vec<String>,
        sheets: HashMap<String, Sheet>,
    }

    impl SheetSource for MemorySource {
        fn categories(&self) -> &[String] {
            &self.categories
        }

        fn load(&self, category: &str) -> Result<Sheet, SheetError> {
            self.sheets
                .get(category)
                .cloned()
                .ok_or_else(|| SheetError::UnknownCategory {
                    category: category.to_string(),
                })
        }
    }

    fn sheet(category: &str, rows: &[(&str, f64)]) -> Sheet {
        let candidates = rows
            .iter()
            .map(|(name, rank)| Candidate::new(*name, *rank))
            .collect();
        Sheet::new(category, vec!["PLAYER NAME".into(), "RK".into()], candidates).unwrap()
    }

    fn test_source() -> MemorySource {
        let mut sheets = HashMap::new();
        sheets.insert(
            "Overall".to_string(),
            sheet("Overall", &[("C", 3.0), ("A", 1.0), ("B", 2.0)]),
        );
        sheets.insert("QB".to_string(), sheet("QB", &[("Mahomes", 1.0), ("Allen", 2.0)]));
        MemorySource {
            categories: vec!["Overall".into(), "QB".into(), "Broken".into()],
            sheets,
        }
    }

    fn started() -> AppState {
        let mut state = AppState::new(Box::new(test_source()));
        state.start();
        state
    }

    fn highlighted(updates: &[UiUpdate]) -> Option<(&str, HighlightKind)> {
        updates.iter().find_map(|u| match u {
            UiUpdate::Highlight { name, kind } => Some((name.as_str(), *kind)),
            _ => None,
        })
    }

    fn notice(updates: &[UiUpdate]) -> Option<&Notice> {
        updates.iter().find_map(|u| match u {
            UiUpdate::Notice(n) => Some(n),
            _ => None,
        })
    }

    #[test]
    fn start_loads_first_category() {
        let mut state = AppState::new(Box::new(test_source()));
        let updates = state.start();
        assert_eq!(state.current_category(), Some("Overall"));
        assert!(matches!(updates[0], UiUpdate::SheetLoaded(_)));
        assert_eq!(notice(&updates).unwrap().text, "Sheet loaded: Overall");
    }

    #[test]
    fn start_with_empty_workbook_reports_error() {
        let mut state = AppState::new(Box::new(MemorySource {
            categories: vec![],
            sheets: HashMap::new(),
        }));
        let updates = state.start();
        assert_eq!(notice(&updates).unwrap().level, NoticeLevel::Error);
        assert!(state.current_category().is_none());
    }

    #[test]
    fn advance_and_undo_emit_highlights() {
        let mut state = started();
        let updates = state.advance();
        assert_eq!(highlighted(&updates), Some(("A", HighlightKind::Picked)));
        let updates = state.advance();
        assert_eq!(highlighted(&updates), Some(("B", HighlightKind::Picked)));
        let updates = state.undo();
        assert_eq!(highlighted(&updates), Some(("B", HighlightKind::Restored)));
        assert_eq!(state.draft_snapshot().picks, vec!["A".to_string()]);
        assert_eq!(state.draft_snapshot().cursor, 1);
        assert_eq!(state.draft_snapshot().next_best.as_deref(), Some("B"));
    }

    #[test]
    fn exhausted_and_nothing_to_undo_are_info_notices() {
        let mut state = started();
        let updates = state.undo();
        assert_eq!(notice(&updates).unwrap(), &Notice::info(NOTHING_TO_UNDO_NOTICE));

        for _ in 0..3 {
            state.advance();
        }
        let updates = state.advance();
        assert_eq!(notice(&updates).unwrap(), &Notice::info(EXHAUSTED_NOTICE));
        assert!(highlighted(&updates).is_none());
        assert_eq!(state.draft_snapshot().remaining, 0);
    }

    #[test]
    fn category_switch_resets_draft_state() {
        let mut state = started();
        state.advance();
        state.advance();
        state.handle_command(UserCommand::SelectCategory("QB".into()));

        assert_eq!(state.current_category(), Some("QB"));
        assert_eq!(state.tracker().cursor(), 0);
        assert!(state.tracker().taken().is_empty());
        assert!(state.tracker().history().is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut state = started();
        state.advance();
        let updates = state.select_category("Broken");

        assert_eq!(notice(&updates).unwrap().level, NoticeLevel::Error);
        assert_eq!(updates.len(), 1);
        assert_eq!(state.current_category(), Some("Overall"));
        assert_eq!(state.tracker().cursor(), 1);
        assert!(state.tracker().is_taken("A"));
    }

    #[test]
    fn sort_by_rank_keeps_draft_state() {
        let mut state = started();
        state.advance();
        let updates = state.sort_by_rank();

        assert_eq!(state.order(), DisplayOrder::Rank);
        assert!(state.tracker().is_taken("A"));
        assert_eq!(state.tracker().history(), &[0]);
        let view = state.sheet_view().unwrap();
        let names: Vec<&str> = view.rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(matches!(updates[0], UiUpdate::SheetReordered(_)));
        assert_eq!(notice(&updates).unwrap().text, "Sorted by rank: Overall");
    }

    #[test]
    fn file_order_is_default_view() {
        let state = started();
        let view = state.sheet_view().unwrap();
        let names: Vec<&str> = view.rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(view.categories, vec!["Overall", "QB", "Broken"]);
    }

    #[test]
    fn category_switch_returns_to_file_order() {
        let mut state = started();
        state.sort_by_rank();
        state.select_category("QB");
        assert_eq!(state.order(), DisplayOrder::File);
    }

    #[test]
    fn next_and_prev_category_wrap() {
        let mut state = started();
        state.handle_command(UserCommand::NextCategory);
        assert_eq!(state.current_category(), Some("QB"));
        // "Broken" fails to load, so the category stays on QB
        state.handle_command(UserCommand::NextCategory);
        assert_eq!(state.current_category(), Some("QB"));
        state.handle_command(UserCommand::PrevCategory);
        assert_eq!(state.current_category(), Some("Overall"));
        state.handle_command(UserCommand::PrevCategory);
        assert_eq!(state.current_category(), Some("Overall"));
    }

    #[test]
    fn sort_without_sheet_is_noop() {
        let mut state = AppState::new(Box::new(test_source()));
        let updates = state.sort_by_rank();
        assert_eq!(state.order(), DisplayOrder::File);
        assert_eq!(notice(&updates).unwrap().text, "No sheet loaded.");
    }

    #[tokio::test]
    async fn run_processes_commands_until_quit() {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);
        let state = AppState::new(Box::new(test_source()));

        cmd_tx.send(UserCommand::Advance).await.unwrap();
        cmd_tx.send(UserCommand::Quit).await.unwrap();
        cmd_tx.send(UserCommand::Advance).await.unwrap();

        run(cmd_rx, ui_tx, state).await.unwrap();

        let mut updates = Vec::new();
        while let Ok(u) = ui_rx.try_recv() {
            updates.push(u);
        }
        let highlights: Vec<_> = updates
            .iter()
            .filter(|u| matches!(u, UiUpdate::Highlight { .. }))
            .collect();
        assert_eq!(highlights.len(), 1);
        assert!(matches!(updates[0], UiUpdate::SheetLoaded(_)));
    }

    #[tokio::test]
    async fn run_exits_when_command_channel_closes() {
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (ui_tx, _ui_rx) = mpsc::channel(64);
        drop(cmd_tx);
        let state = AppState::new(Box::new(test_source()));
        assert!(run(cmd_rx, ui_tx, state).await.is_ok());
    }
}
