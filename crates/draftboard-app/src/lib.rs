// Orchestrator: owns the workbook and the draft tracker, turns user commands
// into state changes and view updates.

pub mod app;

pub use app::{run, AppState};
