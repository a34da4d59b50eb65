// Draft tracker: walks a ranked list, skipping taken candidates, with undo.

use std::collections::HashSet;

use tracing::debug;

use super::candidate::Candidate;
use super::ranked::RankedList;

/// A candidate selected by `advance` or restored by `undo`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    /// Position of the candidate in the ranked list.
    pub index: usize,
    pub candidate: Candidate,
}

/// Per-category draft state over a ranked candidate list.
///
/// `cursor` is the next position to examine, `taken` the names already
/// picked, and `history` the cursor value of every pick not yet undone.
#[derive(Debug, Clone, Default)]
pub struct DraftTracker {
    list: RankedList,
    cursor: usize,
    taken: HashSet<String>,
    history: Vec<usize>,
}

impl DraftTracker {
    pub fn new(list: RankedList) -> Self {
        DraftTracker {
            list,
            ..DraftTracker::default()
        }
    }

    /// Select the best-ranked candidate that is not yet taken.
    ///
    /// Returns `None` when every remaining candidate is taken (or the list is
    /// empty). In that case nothing is mutated.
    pub fn advance(&mut self) -> Option<Pick> {
        let index = self.next_available()?;
        let candidate = self.list.get(index)?.clone();

        self.history.push(index);
        self.taken.insert(candidate.name.clone());
        self.cursor = index + 1;

        debug!(
            "advance: picked '{}' at {} (taken={}, history={})",
            candidate.name,
            index,
            self.taken.len(),
            self.history.len()
        );
        Some(Pick { index, candidate })
    }

    /// Revert the most recent pick.
    ///
    /// Restores the cursor to the reverted candidate's position and makes it
    /// available again. Returns `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<Pick> {
        let index = *self.history.last()?;
        let candidate = self.list.get(index)?.clone();

        self.history.pop();
        self.cursor = index;
        self.taken.remove(&candidate.name);

        debug!(
            "undo: restored '{}' at {} (taken={}, history={})",
            candidate.name,
            index,
            self.taken.len(),
            self.history.len()
        );
        Some(Pick { index, candidate })
    }

    /// Replace the ranked list and clear all draft state.
    pub fn reset(&mut self, list: RankedList) {
        self.list = list;
        self.cursor = 0;
        self.taken.clear();
        self.history.clear();
    }

    /// The candidate the next `advance` would select, without mutating.
    pub fn peek(&self) -> Option<&Candidate> {
        self.next_available().and_then(|i| self.list.get(i))
    }

    pub fn list(&self) -> &RankedList {
        &self.list
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn taken(&self) -> &HashSet<String> {
        &self.taken
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Number of candidates not yet taken.
    pub fn remaining(&self) -> usize {
        self.list.len().saturating_sub(self.taken.len())
    }

    /// Taken candidates in the order they were picked.
    pub fn picks(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.history.iter().filter_map(|&i| self.list.get(i))
    }

    fn next_available(&self) -> Option<usize> {
        (self.cursor..self.list.len()).find(|&i| {
            self.list
                .get(i)
                .is_some_and(|c| !self.taken.contains(&c.name))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
