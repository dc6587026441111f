// gridline entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the Sleeper client
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use gridline_app::app;
use gridline_app::page::Fetcher;
use gridline_core::client::SleeperClient;
use gridline_core::config;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("gridline starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={} ({}), api={}",
        config.league.name, config.league.id, config.api.base_url
    );

    // 3. Build the Sleeper client
    let client = SleeperClient::from_config(&config.api).context("failed to build HTTP client")?;

    // 4. Create mpsc channels
    let (fetch_tx, fetch_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let fetcher = Fetcher::new(Arc::new(client), config.league.id.clone(), fetch_tx);
    let app_state = app::AppState::new(
        config.league.name.clone(),
        &config.api.avatar_base_url,
        fetcher,
    );

    // 5. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(fetch_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 6. Run the TUI (blocks until the user presses 'q' or Ctrl+C)
    if let Err(e) = gridline_tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("gridline shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gridline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("gridline_core=info,gridline_app=info,gridline_tui=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
