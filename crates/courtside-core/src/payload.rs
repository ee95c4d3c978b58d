// Payload loading: the pre-computed stats the dashboard is started with.
//
// Comparison payloads are JSON arrays (or CSV files) of per-game stat rows
// keyed by upper-case column names. The projection payload is a JSON object
// with the player rows, the selectable teams, the preselected team, and the
// initial display mode. Unknown columns are ignored; null or non-numeric stat
// cells are treated as missing.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::compare::Variant;
use crate::entity::{EntityRecord, ProjectionRecord};
use crate::metric::{MetricKey, PROJECTION_STATS};
use crate::projection::{project_season_remaining, DisplayMode, Group, ProjectionPayload};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("unsupported payload format for {path} (expected .json or .csv)")]
    UnsupportedFormat { path: String },

    #[error("validation error in {path}: {message}")]
    Validation { path: String, message: String },
}

/// One raw payload row: column name to cell value.
type RawRow = HashMap<String, Value>;

// ---------------------------------------------------------------------------
// Raw projection payload (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawProjectionPayload {
    players: Vec<RawRow>,
    #[serde(rename = "allTeams", default)]
    all_teams: Vec<RawTeam>,
    #[serde(rename = "selectedTeam", default)]
    selected_team: Option<u64>,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    id: u64,
    full_name: String,
    #[serde(default)]
    abbreviation: Option<String>,
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// Numeric value of a cell. Numbers pass through; numeric strings (CSV
/// cells) are parsed; anything else is missing.
fn number(row: &RawRow, column: &str) -> Option<f64> {
    let v = match row.get(column)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    v.is_finite().then_some(v)
}

fn id(row: &RawRow, column: &str) -> Option<u64> {
    match row.get(column)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn cell_text(row: &RawRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Comparison payloads
// ---------------------------------------------------------------------------

/// Convert a raw stat row into an entity for the given variant.
fn entity_from_row(row: &RawRow, variant: Variant) -> Option<EntityRecord> {
    let (name_col, id_col) = match variant {
        Variant::Players => ("PLAYER_NAME", "PLAYER_ID"),
        Variant::Teams => ("TEAM_NAME", "TEAM_ID"),
    };

    let mut entity = EntityRecord::new(cell_text(row, name_col)?);
    entity.id = id(row, id_col);
    if variant == Variant::Players {
        entity.group = id(row, "TEAM_ID");
    }
    for key in MetricKey::ALL {
        if let Some(v) = number(row, key.as_str()) {
            entity.values.set(key, v);
        }
    }
    Some(entity)
}

fn entities_from_rows(
    rows: Vec<RawRow>,
    variant: Variant,
    origin: &str,
) -> Result<Vec<EntityRecord>, PayloadError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            entity_from_row(row, variant).ok_or_else(|| PayloadError::Validation {
                path: origin.to_string(),
                message: format!("row {} has no {} name", i + 1, variant.subject().to_lowercase()),
            })
        })
        .collect()
}

/// Parse a JSON comparison payload (an array of stat rows).
pub fn parse_comparison_json(
    body: &str,
    variant: Variant,
    origin: &str,
) -> Result<Vec<EntityRecord>, PayloadError> {
    let rows: Vec<RawRow> = serde_json::from_str(body).map_err(|e| PayloadError::Json {
        path: origin.to_string(),
        source: e,
    })?;
    entities_from_rows(rows, variant, origin)
}

/// Parse a CSV comparison payload with a header row.
pub fn load_comparison_csv_from_reader<R: Read>(
    rdr: R,
    variant: Variant,
    origin: &str,
) -> Result<Vec<EntityRecord>, PayloadError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<HashMap<String, String>>() {
        match result {
            Ok(raw) => rows.push(
                raw.into_iter()
                    .map(|(k, v)| (k.trim().to_string(), Value::String(v)))
                    .collect(),
            ),
            Err(e) => {
                return Err(PayloadError::Csv {
                    path: origin.to_string(),
                    source: e,
                })
            }
        }
    }
    entities_from_rows(rows, variant, origin)
}

/// Load a comparison payload file, dispatching on its extension.
pub fn load_comparison(path: &Path, variant: Variant) -> Result<Vec<EntityRecord>, PayloadError> {
    let origin = path.display().to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let entities = match ext.as_deref() {
        Some("json") => parse_comparison_json(&read_file(path)?, variant, &origin)?,
        Some("csv") => {
            let file = std::fs::File::open(path).map_err(|e| PayloadError::Io {
                path: origin.clone(),
                source: e,
            })?;
            load_comparison_csv_from_reader(file, variant, &origin)?
        }
        _ => return Err(PayloadError::UnsupportedFormat { path: origin }),
    };

    info!(
        "loaded {} {} record(s) from {}",
        entities.len(),
        variant.subject().to_lowercase(),
        origin
    );
    Ok(entities)
}

// ---------------------------------------------------------------------------
// Projection payload
// ---------------------------------------------------------------------------

/// Heuristic projection for `stat`: the precomputed `PROJECTED_*` column,
/// or per-game average times games remaining when only raw stats exist.
fn heuristic_value(row: &RawRow, stat: MetricKey) -> Option<f64> {
    if let Some(v) = number(row, &stat.projection_field()) {
        return Some(v);
    }
    let per_game = number(row, stat.as_str())?;
    let gp = number(row, "GP").unwrap_or(0.0).max(0.0) as u32;
    Some(project_season_remaining(per_game, gp))
}

/// Parse the projection payload object.
pub fn parse_projection_payload(
    body: &str,
    origin: &str,
) -> Result<ProjectionPayload, PayloadError> {
    let raw: RawProjectionPayload = serde_json::from_str(body).map_err(|e| PayloadError::Json {
        path: origin.to_string(),
        source: e,
    })?;

    let mut players = Vec::with_capacity(raw.players.len());
    for (i, row) in raw.players.iter().enumerate() {
        let Some(name) = cell_text(row, "PLAYER_NAME") else {
            warn!("skipping projection row {} in {}: no PLAYER_NAME", i + 1, origin);
            continue;
        };
        let mut entity = EntityRecord::new(name);
        entity.id = id(row, "PLAYER_ID");
        entity.group = id(row, "TEAM_ID");
        for stat in PROJECTION_STATS {
            if let Some(v) = heuristic_value(row, stat) {
                entity.values.set(stat, v);
            }
        }
        players.push(ProjectionRecord::new(entity));
    }

    let mode = match raw.mode.as_deref() {
        None => DisplayMode::default(),
        Some(m) => DisplayMode::from_str_mode(m).ok_or_else(|| PayloadError::Validation {
            path: origin.to_string(),
            message: format!("unknown display mode `{m}`"),
        })?,
    };

    let groups = raw
        .all_teams
        .into_iter()
        .map(|t| Group {
            id: t.id,
            full_name: t.full_name,
            abbreviation: t.abbreviation,
        })
        .collect();

    Ok(ProjectionPayload {
        players,
        groups,
        selected_group: raw.selected_team,
        mode,
    })
}

/// Load the projection payload from a JSON file.
pub fn load_projections(path: &Path) -> Result<ProjectionPayload, PayloadError> {
    let origin = path.display().to_string();
    let payload = parse_projection_payload(&read_file(path)?, &origin)?;
    info!(
        "loaded {} projection row(s) and {} team(s) from {}",
        payload.players.len(),
        payload.groups.len(),
        origin
    );
    Ok(payload)
}

fn read_file(path: &Path) -> Result<String, PayloadError> {
    std::fs::read_to_string(path).map_err(|e| PayloadError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYERS_JSON: &str = r#"[
        {"PLAYER_ID": 2544, "PLAYER_NAME": "LeBron James", "TEAM_ID": 1610612747,
         "PTS": 25.7, "REB": 7.3, "AST": 8.3, "STL": 1.3, "BLK": 0.5, "GP": 71},
        {"PLAYER_ID": 201939, "PLAYER_NAME": "Stephen Curry", "TEAM_ID": 1610612744,
         "PTS": 26.4, "REB": 4.5, "AST": 5.1, "STL": null, "NICKNAME": "Chef"}
    ]"#;

    #[test]
    fn parses_player_rows() {
        let players = parse_comparison_json(PLAYERS_JSON, Variant::Players, "inline").unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "LeBron James");
        assert_eq!(players[0].id, Some(2544));
        assert_eq!(players[0].group, Some(1610612747));
        assert_eq!(players[0].value(MetricKey::Assists), 8.3);
        // null and absent cells are missing, read back as zero
        assert!(!players[1].values.contains(MetricKey::Steals));
        assert_eq!(players[1].value(MetricKey::Blocks), 0.0);
    }

    #[test]
    fn team_rows_use_team_columns() {
        let json = r#"[{"TEAM_ID": 1, "TEAM_NAME": "Boston Celtics", "PTS": 120.6, "TOV": 11.9}]"#;
        let teams = parse_comparison_json(json, Variant::Teams, "inline").unwrap();
        assert_eq!(teams[0].name, "Boston Celtics");
        assert_eq!(teams[0].id, Some(1));
        assert_eq!(teams[0].group, None);
        assert_eq!(teams[0].value(MetricKey::Turnovers), 11.9);
    }

    #[test]
    fn row_without_name_is_rejected() {
        let json = r#"[{"PTS": 10}]"#;
        match parse_comparison_json(json, Variant::Players, "inline") {
            Err(PayloadError::Validation { message, .. }) => {
                assert!(message.contains("row 1"), "{message}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            parse_comparison_json("{not json", Variant::Players, "inline"),
            Err(PayloadError::Json { .. })
        ));
    }

    #[test]
    fn csv_rows_parse_numeric_strings() {
        let csv_data = "PLAYER_ID,PLAYER_NAME,TEAM_ID,PTS,REB,AST,STL\n\
                        1,Alpha,10,20,5,3,\n\
                        2,Beta,20,18.5,9,1,2\n";
        let players =
            load_comparison_csv_from_reader(csv_data.as_bytes(), Variant::Players, "inline")
                .unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(
            players[0].series(&[MetricKey::Points, MetricKey::Steals]),
            vec![20.0, 0.0]
        );
        assert_eq!(players[1].value(MetricKey::Points), 18.5);
        assert_eq!(players[1].group, Some(20));
    }

    #[test]
    fn load_comparison_rejects_unknown_extension() {
        let err = load_comparison(Path::new("players.xlsx"), Variant::Players).unwrap_err();
        assert!(matches!(err, PayloadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn load_comparison_missing_file_is_io_error() {
        let err =
            load_comparison(Path::new("definitely/not/here.json"), Variant::Players).unwrap_err();
        assert!(matches!(err, PayloadError::Io { .. }));
    }

    #[test]
    fn projection_payload_reads_precomputed_and_falls_back() {
        let json = r#"{
            "players": [
                {"PLAYER_ID": 1, "PLAYER_NAME": "A", "TEAM_ID": 10,
                 "PROJECTED_PTS": 550.0, "PROJECTED_REB": 110.0, "PROJECTED_AST": 44.0},
                {"PLAYER_ID": 2, "PLAYER_NAME": "B", "TEAM_ID": 20,
                 "PTS": 20.0, "REB": 10.0, "GP": 72},
                {"PLAYER_ID": 3, "TEAM_ID": 20, "PROJECTED_PTS": 1.0}
            ],
            "allTeams": [
                {"id": 10, "full_name": "Los Angeles Lakers", "abbreviation": "LAL"},
                {"id": 20, "full_name": "Boston Celtics"}
            ],
            "selectedTeam": 10,
            "mode": "both"
        }"#;
        let payload = parse_projection_payload(json, "inline").unwrap();
        assert_eq!(payload.players.len(), 2);
        assert_eq!(payload.players[0].heuristic(MetricKey::Points), 550.0);
        assert_eq!(payload.players[1].heuristic(MetricKey::Points), 200.0);
        assert_eq!(payload.players[1].heuristic(MetricKey::Rebounds), 100.0);
        assert_eq!(payload.players[1].heuristic(MetricKey::Assists), 0.0);
        assert_eq!(payload.groups.len(), 2);
        assert_eq!(payload.groups[1].label(), "Boston Celtics");
        assert_eq!(payload.selected_group, Some(10));
        assert_eq!(payload.mode, DisplayMode::Both);
    }

    #[test]
    fn projection_payload_defaults() {
        let payload = parse_projection_payload(r#"{"players": []}"#, "inline").unwrap();
        assert!(payload.players.is_empty());
        assert!(payload.groups.is_empty());
        assert_eq!(payload.selected_group, None);
        assert_eq!(payload.mode, DisplayMode::Heuristic);
    }

    #[test]
    fn projection_payload_rejects_unknown_mode() {
        let err = parse_projection_payload(r#"{"players": [], "mode": "vibes"}"#, "inline")
            .unwrap_err();
        assert!(matches!(err, PayloadError::Validation { .. }));
    }
}
