// Integration tests for courtside-core.
//
// These drive the public API end to end: payload files on disk become
// comparison and projection views, and the model projection client talks to
// a local HTTP server standing in for the augmentation endpoint.

use std::path::Path;

use courtside_core::chart::{ChartKind, ChartSelector, SeriesPaint, COOL, WARM};
use courtside_core::compare::{ComparisonView, MountPoints, Variant};
use courtside_core::error::ViewError;
use courtside_core::fetch::{gather_model_values, HttpModelSource};
use courtside_core::metric::MetricKey;
use courtside_core::payload::{load_comparison, load_projections, PayloadError};
use courtside_core::projection::{ControlChange, DisplayMode, GroupFilter, ProjectionView};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(FIXTURES).join(name)
}

fn player_metrics() -> Vec<MetricKey> {
    vec![
        MetricKey::Points,
        MetricKey::Rebounds,
        MetricKey::Assists,
        MetricKey::Steals,
        MetricKey::Blocks,
    ]
}

fn team_metrics() -> Vec<MetricKey> {
    MetricKey::ALL.to_vec()
}

/// Serve canned model projection responses on an ephemeral port.
///
/// Player 2544 gets a value, 201939 gets HTTP 500, everyone else gets a
/// body without the projection field.
async fn spawn_model_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("")
                    .to_string();

                let (status, body) = if path.ends_with("/player_projections_ml/2544") {
                    ("200 OK", r#"{"PLAYER_ID": 2544, "PROJECTED_PTS_ML": 1750.5}"#)
                } else if path.ends_with("/player_projections_ml/201939") {
                    ("500 Internal Server Error", r#"{"error": "boom"}"#)
                } else {
                    ("200 OK", r#"{"error": "Model not found"}"#)
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

// ===========================================================================
// Comparison views from fixtures
// ===========================================================================

#[test]
fn player_comparison_from_json_fixture() {
    let records = load_comparison(&fixture("players.json"), Variant::Players).unwrap();
    let view = ComparisonView::new(
        Variant::Players,
        records,
        player_metrics(),
        &MountPoints::all(),
        ChartSelector::Bar,
    )
    .unwrap();

    let bar = view.instance("playerComparisonChart").unwrap();
    assert!(bar.visible);
    assert_eq!(bar.spec.title, "Player Comparison (Bar Chart)");
    assert_eq!(bar.spec.labels, vec!["PTS", "REB", "AST", "STL", "BLK"]);
    assert_eq!(bar.spec.series[0].name, "LeBron James");
    assert_eq!(bar.spec.series[0].paint, SeriesPaint::Solid(WARM));
    assert_eq!(bar.spec.series[1].name, "Stephen Curry");
    assert_eq!(bar.spec.series[1].paint, SeriesPaint::Solid(COOL));
    // Null BLK is a missing value and renders as zero.
    assert_eq!(bar.spec.series[1].data, vec![24.5, 4.4, 6.0, 0.9, 0.0]);

    let radar = view.instance("radarChart").unwrap();
    assert!(!radar.visible);
    assert_eq!(radar.spec.kind, ChartKind::Radar);
    assert!(view.skipped().is_empty());
}

#[test]
fn player_comparison_from_csv_fixture() {
    let records = load_comparison(&fixture("players.csv"), Variant::Players).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Luka Doncic");
    assert_eq!(records[0].id, Some(1629029));
    assert_eq!(records[0].group, Some(1610612742));
    assert_eq!(records[1].value(MetricKey::Turnovers), 0.0);

    let mut view = ComparisonView::new(
        Variant::Players,
        records,
        player_metrics(),
        &MountPoints::new(["playerComparisonChart", "lineChart"]),
        ChartSelector::Bar,
    )
    .unwrap();

    assert_eq!(view.skipped().len(), 1);
    assert_eq!(
        view.available_selectors(),
        vec![ChartSelector::Bar, ChartSelector::Line]
    );
    view.cycle();
    let visible: Vec<_> = view.visible().map(|i| i.surface.as_str()).collect();
    assert_eq!(visible, vec!["lineChart"]);
}

#[test]
fn team_comparison_from_json_fixture() {
    let records = load_comparison(&fixture("teams.json"), Variant::Teams).unwrap();
    let mut view = ComparisonView::new(
        Variant::Teams,
        records,
        team_metrics(),
        &MountPoints::all(),
        ChartSelector::Bar,
    )
    .unwrap();

    let stacked = view.instance("teamComparisonChart").unwrap();
    assert_eq!(stacked.spec.kind, ChartKind::StackedBar);
    assert_eq!(stacked.spec.labels.len(), 6);
    assert!(stacked
        .spec
        .series
        .iter()
        .all(|s| s.stack.as_deref() == Some("Stack 0")));

    view.show(ChartSelector::Doughnut);
    let titles: Vec<_> = view.visible().map(|i| i.spec.title.clone()).collect();
    assert_eq!(
        titles,
        vec![
            "Los Angeles Lakers Stat Breakdown".to_string(),
            "Golden State Warriors Stat Breakdown".to_string()
        ]
    );
}

#[test]
fn single_entity_payload_is_rejected() {
    let mut records = load_comparison(&fixture("players.json"), Variant::Players).unwrap();
    records.truncate(1);
    let err = ComparisonView::new(
        Variant::Players,
        records,
        player_metrics(),
        &MountPoints::all(),
        ChartSelector::Bar,
    )
    .unwrap_err();
    assert!(matches!(err, ViewError::Validation(_)));
    assert!(err.is_fatal());
}

#[test]
fn unsupported_payload_extension_is_an_error() {
    let err =
        load_comparison(Path::new("tests/fixtures/players.xml"), Variant::Players).unwrap_err();
    assert!(matches!(err, PayloadError::UnsupportedFormat { .. }));
}

#[test]
fn missing_payload_file_is_an_io_error() {
    let err = load_comparison(&fixture("nope.json"), Variant::Teams).unwrap_err();
    assert!(matches!(err, PayloadError::Io { .. }));
}

// ===========================================================================
// Projection view against a local model server
// ===========================================================================

#[tokio::test]
async fn projection_view_joins_model_fetches_before_first_chart() {
    let base_url = spawn_model_server().await;
    let source = HttpModelSource::new(base_url);
    let payload = load_projections(&fixture("projections.json")).unwrap();
    assert_eq!(payload.mode, DisplayMode::Both);

    let mut view = ProjectionView::initialize(payload, &source).await.unwrap();

    let chart = view.chart();
    assert_eq!(chart.title, "PTS Projection");
    assert_eq!(
        chart.labels,
        vec!["LeBron James", "Austin Reaves", "Stephen Curry"]
    );
    assert_eq!(chart.series[0].name, "Heuristic PTS");
    assert_eq!(chart.series[0].data, vec![1800.0, 1100.0, 1846.0]);
    assert!(chart.series[0].dashed);
    assert_eq!(chart.series[1].name, "ML PTS");
    assert_eq!(chart.series[1].data, vec![1750.5, 0.0, 0.0]);
    assert!(chart.visible_series().count() == 2);

    view.apply(ControlChange::Group(GroupFilter::Group(1610612747)));
    view.apply(ControlChange::Stat(MetricKey::Rebounds));
    let chart = view.chart();
    assert_eq!(chart.title, "REB Projection");
    assert_eq!(chart.labels, vec!["LeBron James", "Austin Reaves"]);
    assert_eq!(chart.series[0].data, vec![576.0, 315.0]);
    assert_eq!(chart.series[1].data, vec![0.0, 0.0]);
    assert_eq!(view.group_label(), "LAL");
}

#[tokio::test]
async fn gather_against_http_server_counts_successes() {
    let base_url = spawn_model_server().await;
    let source = HttpModelSource::new(format!("{base_url}/"));
    let mut payload = load_projections(&fixture("projections.json")).unwrap();

    let resolved = gather_model_values(&source, &mut payload.players).await;

    assert_eq!(resolved, 1);
    assert_eq!(payload.players[0].model(MetricKey::Points), 1750.5);
    assert_eq!(payload.players[2].model(MetricKey::Points), 0.0);
}

#[tokio::test]
async fn unreachable_model_server_still_renders_heuristics() {
    // Bind then drop to get a port nobody is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpModelSource::new(format!("http://{addr}"));
    let payload = load_projections(&fixture("projections.json")).unwrap();
    let mut view = ProjectionView::initialize(payload, &source).await.unwrap();

    view.apply(ControlChange::Mode(DisplayMode::Heuristic));
    let chart = view.chart();
    assert!(!chart.series[0].hidden);
    assert!(chart.series[1].hidden);
    assert!(chart.series[1].data.iter().all(|v| *v == 0.0));
    assert_eq!(chart.max_value(), 1846.0);
}
