// Draft tracking: candidate records, rank ordering, and the take/undo tracker.

pub mod candidate;
pub mod ranked;
pub mod tracker;

pub use candidate::{format_rank, sort_by_rank, Candidate};
pub use ranked::{DraftError, RankedList};
pub use tracker::{DraftTracker, Pick};
