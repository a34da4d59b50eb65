// Checks that the shipped configuration and sample workbook are usable.

use std::path::PathBuf;

use draftboard_app::AppState;
use draftboard_core::config::{load_config_from, CONFIG_FILE};
use draftboard_core::protocol::{UiUpdate, UserCommand};
use draftboard_core::sheet::{CsvWorkbook, SheetSource};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn shipped_workbook() -> CsvWorkbook {
    let config = load_config_from(&repo_root().join("config").join(CONFIG_FILE))
        .expect("config/draftboard.toml should load");
    CsvWorkbook::open(
        &config.workbook.path,
        config.columns.clone(),
        &config.workbook.default_category,
    )
    .expect("sample workbook should open")
}

#[test]
fn shipped_config_points_at_sample_workbook() {
    let config = load_config_from(&repo_root().join("config").join(CONFIG_FILE)).unwrap();
    assert!(
        config.workbook.path.is_dir(),
        "workbook dir {} should exist",
        config.workbook.path.display()
    );
    assert_eq!(config.workbook.default_category, "Overall");
}

#[test]
fn every_sample_sheet_loads() {
    let workbook = shipped_workbook();
    assert_eq!(workbook.categories()[0], "Overall");
    for category in workbook.categories() {
        let sheet = workbook
            .load(category)
            .unwrap_or_else(|e| panic!("sheet {category} failed to load: {e}"));
        assert!(!sheet.is_empty(), "sheet {category} is empty");
    }
}

#[test]
fn sample_draft_session() {
    let mut state = AppState::new(Box::new(shipped_workbook()));
    state.start();

    let updates = state.handle_command(UserCommand::Advance);
    assert!(updates.contains(&UiUpdate::Highlight {
        name: "Christian McCaffrey".into(),
        kind: draftboard_core::protocol::HighlightKind::Picked,
    }));

    state.handle_command(UserCommand::SelectCategory("QB".into()));
    assert!(state.tracker().taken().is_empty());
    let updates = state.handle_command(UserCommand::Advance);
    assert!(updates
        .iter()
        .any(|u| matches!(u, UiUpdate::Highlight { name, .. } if name == "Josh Allen")));
}
