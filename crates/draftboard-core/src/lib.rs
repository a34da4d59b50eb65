// Library root: draft tracking core, workbook loading, configuration and the
// message protocol shared by the orchestrator and the view.

pub mod config;
pub mod draft;
pub mod protocol;
pub mod sheet;
