// Rank-ordered candidate list for a single category.

use std::collections::HashSet;

use thiserror::Error;

use super::candidate::{sort_by_rank, Candidate};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    /// Two rows share a name, which would make the taken set ambiguous.
    #[error("duplicate candidate name `{name}`")]
    DuplicateName { name: String },
}

/// Candidates of one category sorted ascending by rank.
///
/// Construction enforces name uniqueness. The list is immutable afterwards;
/// a new category or reload produces a new list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedList {
    candidates: Vec<Candidate>,
}

impl RankedList {
    /// Sort `candidates` by rank and validate that names are unique.
    pub fn new(candidates: &[Candidate]) -> Result<Self, DraftError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
        for c in candidates {
            if !seen.insert(c.name.as_str()) {
                return Err(DraftError::DuplicateName {
                    name: c.name.clone(),
                });
            }
        }
        Ok(RankedList {
            candidates: sort_by_rank(candidates),
        })
    }

    pub fn empty() -> Self {
        RankedList::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Index of the candidate with the given name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.name == name)
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
