// Draft board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the workbook directory
// 4. Create mpsc channels
// 5. Spawn the orchestrator task
// 6. Run the TUI until the user quits
// 7. Wait briefly for the orchestrator to finish

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use draftboard_app::{app, AppState};
use draftboard_core::config;
use draftboard_core::sheet::{CsvWorkbook, SheetSource};
use draftboard_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Draft board starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: workbook={}, name column='{}', rank column='{}'",
        config.workbook.path.display(),
        config.columns.name,
        config.columns.rank
    );

    let workbook = CsvWorkbook::open(
        &config.workbook.path,
        config.columns.clone(),
        &config.workbook.default_category,
    )
    .with_context(|| format!("failed to open workbook {}", config.workbook.path.display()))?;
    info!("Categories: {:?}", workbook.categories());

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = AppState::new(Box::new(workbook));
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // The TUI dropped cmd_tx on return, which ends the app loop.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await;

    info!("Draft board shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draftboard=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
