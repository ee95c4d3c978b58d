// Courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the player and team comparison views
// 4. Spawn the projection loader (model fetches joined in the background)
// 5. Run the TUI until the user quits
// 6. Cleanup on exit

use courtside_core::compare::Variant;
use courtside_core::config;
use courtside_core::fetch::ModelClient;
use courtside_core::season;
use courtside_tui::app::{self, PanelState};
use courtside_tui::tui::{self, ViewState};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Courtside starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} player metric(s), {} team metric(s), default chart {}",
        config.view.metrics.len(),
        config.view.team_metrics.len(),
        config.view.default_kind
    );

    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;

    // 3. Comparison views (a bad payload only disables its screen)
    let players = app::build_comparison(&config, Variant::Players, &base_dir);
    let teams = app::build_comparison(&config, Variant::Teams, &base_dir);
    for (name, panel) in [("players", &players), ("teams", &teams)] {
        if let PanelState::Failed(msg) = panel {
            warn!("{} screen disabled: {}", name, msg);
        }
    }

    // 4. Projection loader
    let (ui_tx, ui_rx) = mpsc::channel(8);
    let client = ModelClient::from_config(&config);
    match &client {
        ModelClient::Active(source) => {
            info!("Model projections enabled ({})", source.base_url())
        }
        ModelClient::Disabled => info!("Model projections disabled; ML series will read zero"),
    }
    let loader = app::spawn_projection_loader(
        base_dir.join(&config.data.projections),
        client,
        ui_tx,
    );

    // 5. Run the TUI event loop (blocking until user quits)
    let view_state = ViewState::new(players, teams, season::current_season());
    if let Err(e) = tui::run(ui_rx, view_state, base_dir.join("exports")).await {
        error!("TUI error: {}", e);
    }

    // 6. Cleanup: the loader may still be waiting on fetches
    loader.abort();

    info!("Courtside shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = match directories::ProjectDirs::from("", "", "courtside") {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => std::env::current_dir()?.join("logs"),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("courtside.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("courtside=info,courtside_tui=info,courtside_core=info,warn")
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
