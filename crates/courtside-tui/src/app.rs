// Application wiring: builds the views each screen shows, runs the
// projection loader in the background, and exports visible charts.

use std::path::{Path, PathBuf};

use anyhow::Context;
use courtside_core::chart::ChartSpec;
use courtside_core::compare::{ComparisonView, Variant};
use courtside_core::config::Config;
use courtside_core::fetch::{ModelClient, ModelSource};
use courtside_core::payload;
use courtside_core::projection::ProjectionView;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::protocol::UiUpdate;

// ---------------------------------------------------------------------------
// PanelState
// ---------------------------------------------------------------------------

/// What a screen currently has to show.
#[derive(Debug, Clone)]
pub enum PanelState<T> {
    /// Data is still being fetched.
    Loading,
    Ready(T),
    /// The view could not be built. Carries the diagnostic shown in place
    /// of the charts.
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            PanelState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Load the payload for `variant` and build its comparison view.
///
/// Never fails outright: a bad payload only disables this screen.
pub fn build_comparison(
    config: &Config,
    variant: Variant,
    base_dir: &Path,
) -> PanelState<ComparisonView> {
    let (path, metrics) = match variant {
        Variant::Players => (&config.data.players, &config.view.metrics),
        Variant::Teams => (&config.data.teams, &config.view.team_metrics),
    };
    let path = base_dir.join(path);

    let records = match payload::load_comparison(&path, variant) {
        Ok(records) => records,
        Err(e) => {
            error!("{} payload unusable: {}", variant.subject(), e);
            return PanelState::Failed(e.to_string());
        }
    };

    match ComparisonView::new(
        variant,
        records,
        metrics.clone(),
        &config.mounts,
        config.view.default_kind,
    ) {
        Ok(view) => PanelState::Ready(view),
        Err(e) => PanelState::Failed(e.to_string()),
    }
}

/// Load the projection payload and build the view once every model fetch
/// has settled.
pub async fn build_projection_view<S>(path: &Path, source: &S) -> anyhow::Result<ProjectionView>
where
    S: ModelSource + ?Sized,
{
    let payload = payload::load_projections(path)
        .with_context(|| format!("failed to load projections from {}", path.display()))?;
    let view = ProjectionView::initialize(payload, source)
        .await
        .context("failed to build projection view")?;
    Ok(view)
}

/// Spawn the projection loader. The result is delivered as a single
/// `UiUpdate` when the fetch batch has been joined.
pub fn spawn_projection_loader(
    path: PathBuf,
    client: ModelClient,
    ui_tx: mpsc::Sender<UiUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let update = match build_projection_view(&path, &client).await {
            Ok(view) => UiUpdate::ProjectionsReady(Box::new(view)),
            Err(e) => {
                error!("projection screen unavailable: {:#}", e);
                UiUpdate::ProjectionsFailed(format!("{e:#}"))
            }
        };
        if ui_tx.send(update).await.is_err() {
            info!("TUI closed before projections were ready");
        }
    })
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write `charts` as one JSON object keyed by surface id, each value a
/// Chart.js configuration. Returns the written path.
pub fn export_charts(
    dir: &Path,
    screen: &str,
    charts: &[(&str, &ChartSpec)],
) -> anyhow::Result<PathBuf> {
    if charts.is_empty() {
        anyhow::bail!("no visible chart to export");
    }

    let mut doc = Map::new();
    for (surface, spec) in charts {
        doc.insert(surface.to_string(), spec.to_chartjs());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{screen}-{stamp}.json"));
    let body = serde_json::to_string_pretty(&Value::Object(doc))?;
    std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;

    info!("exported {} chart(s) to {}", charts.len(), path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
