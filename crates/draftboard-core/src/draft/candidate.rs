// Candidate records and rank ordering.

use std::cmp::Ordering;

/// A single rankable player row from a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Display name; unique within a category.
    pub name: String,
    /// Precomputed rank. Lower is better.
    pub rank: f64,
    /// The full source row in header order, including the name and rank cells.
    pub fields: Vec<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, rank: f64) -> Self {
        let name = name.into();
        Candidate {
            fields: vec![name.clone(), format_rank(rank)],
            name,
            rank,
        }
    }

    /// Build a candidate that carries an explicit payload row.
    pub fn with_fields(name: impl Into<String>, rank: f64, fields: Vec<String>) -> Self {
        Candidate {
            name: name.into(),
            rank,
            fields,
        }
    }

    /// Compare two candidates by rank only.
    pub fn cmp_rank(&self, other: &Candidate) -> Ordering {
        self.rank.total_cmp(&other.rank)
    }
}

/// Return a copy of `candidates` ordered by ascending rank.
///
/// The sort is stable: candidates sharing a rank keep their relative order.
pub fn sort_by_rank(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(Candidate::cmp_rank);
    sorted
}

/// Render a rank the way spreadsheets usually show it: integral ranks without
/// a trailing `.0`.
pub fn format_rank(rank: f64) -> String {
    if rank.fract() == 0.0 && rank.abs() < 1e15 {
        format!("{}", rank as i64)
    } else {
        format!("{rank}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
