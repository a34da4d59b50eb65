// Message types exchanged between the orchestrator and the view.
//
// The view sends `UserCommand`s; the orchestrator answers with `UiUpdate`s.
// The view never touches draft state directly.

use crate::draft::Candidate;

/// Actions a user can trigger from the view.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Switch to the named category (resets draft state).
    SelectCategory(String),
    /// Switch to the category after the current one, wrapping.
    NextCategory,
    /// Switch to the category before the current one, wrapping.
    PrevCategory,
    /// Display the current sheet in rank order. Draft state is kept.
    SortByRank,
    /// Pick the next best available candidate.
    Advance,
    /// Revert the most recent pick.
    Undo,
    Quit,
}

/// Row order used when rendering the candidate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrder {
    /// Order of the rows in the source sheet.
    #[default]
    File,
    /// Ascending rank.
    Rank,
}

/// Everything the view needs to draw the candidate table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetView {
    pub category: String,
    /// All category names, for the category tabs.
    pub categories: Vec<String>,
    pub columns: Vec<String>,
    /// Rows in the order given by `order`.
    pub rows: Vec<Candidate>,
    pub order: DisplayOrder,
}

/// Read-only summary of the draft state after a change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftSnapshot {
    pub cursor: usize,
    /// Taken names in pick order.
    pub picks: Vec<String>,
    pub remaining: usize,
    pub total: usize,
    /// The candidate the next advance would pick.
    pub next_best: Option<String>,
}

/// Why a candidate is being highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Picked,
    Restored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A one-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Updates pushed from the orchestrator to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A category was (re)loaded; any previous selection is void.
    SheetLoaded(Box<SheetView>),
    /// Same sheet, new display order; the selection still applies.
    SheetReordered(Box<SheetView>),
    /// Select and scroll to the named candidate.
    Highlight { name: String, kind: HighlightKind },
    Notice(Notice),
    DraftState(DraftSnapshot),
}

pub const EXHAUSTED_NOTICE: &str = "No more available players.";
pub const NOTHING_TO_UNDO_NOTICE: &str = "No previous selection to undo.";
