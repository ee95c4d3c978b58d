// Stat identifiers shared by every chart and payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A per-game basketball statistic that can be charted.
///
/// The order of a `Vec<MetricKey>` is significant: it becomes the label
/// order of every series in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    Assists,
    #[serde(rename = "STL")]
    Steals,
    #[serde(rename = "BLK")]
    Blocks,
    #[serde(rename = "TOV")]
    Turnovers,
}

/// Stats offered by the projection selector.
pub const PROJECTION_STATS: [MetricKey; 3] =
    [MetricKey::Points, MetricKey::Rebounds, MetricKey::Assists];

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Points,
        MetricKey::Rebounds,
        MetricKey::Assists,
        MetricKey::Steals,
        MetricKey::Blocks,
        MetricKey::Turnovers,
    ];

    /// Column name used in payloads and as the chart label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Points => "PTS",
            MetricKey::Rebounds => "REB",
            MetricKey::Assists => "AST",
            MetricKey::Steals => "STL",
            MetricKey::Blocks => "BLK",
            MetricKey::Turnovers => "TOV",
        }
    }

    /// Parse a stat name, case-insensitively.
    ///
    /// Accepts the payload column names ("PTS", "REB", ...) and the
    /// TOV alias "TO".
    pub fn from_str_key(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PTS" => Some(MetricKey::Points),
            "REB" => Some(MetricKey::Rebounds),
            "AST" => Some(MetricKey::Assists),
            "STL" => Some(MetricKey::Steals),
            "BLK" => Some(MetricKey::Blocks),
            "TOV" | "TO" => Some(MetricKey::Turnovers),
            _ => None,
        }
    }

    /// Parse an ordered list of stat names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<MetricKey>, String> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                MetricKey::from_str_key(n).ok_or_else(|| format!("unknown metric `{n}`"))
            })
            .collect()
    }

    /// Payload field holding the heuristic season projection for this stat.
    pub fn projection_field(&self) -> String {
        format!("PROJECTED_{}", self.as_str())
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric values for one subject. Absent metrics read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricValues(HashMap<MetricKey, f64>);

impl MetricValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or `0.0` when it was never set.
    pub fn get(&self, key: MetricKey) -> f64 {
        self.0.get(&key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn set(&mut self, key: MetricKey, value: f64) {
        self.0.insert(key, value);
    }

    /// Values aligned to `keys`, zero-filled.
    pub fn aligned(&self, keys: &[MetricKey]) -> Vec<f64> {
        keys.iter().map(|k| self.get(*k)).collect()
    }
}

impl FromIterator<(MetricKey, f64)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        MetricValues(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
