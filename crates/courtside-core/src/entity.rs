// Comparable subjects: players and teams with their metric values.

use serde::{Deserialize, Serialize};

use crate::error::ViewError;
use crate::metric::{MetricKey, MetricValues};

// ---------------------------------------------------------------------------
// EntityRecord
// ---------------------------------------------------------------------------

/// One player or team with its per-game stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Display name used as the series label.
    pub name: String,
    /// Player or team id, used to key model fetches.
    pub id: Option<u64>,
    /// Group (team) the entity belongs to, used by the group filter.
    pub group: Option<u64>,
    pub values: MetricValues,
}

impl EntityRecord {
    pub fn new(name: impl Into<String>) -> Self {
        EntityRecord {
            name: name.into(),
            id: None,
            group: None,
            values: MetricValues::new(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_group(mut self, group: u64) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_value(mut self, key: MetricKey, value: f64) -> Self {
        self.values.set(key, value);
        self
    }

    /// Metric value, or `0.0` when missing.
    pub fn value(&self, key: MetricKey) -> f64 {
        self.values.get(key)
    }

    /// Values aligned to `metrics`, missing ones as zero.
    pub fn series(&self, metrics: &[MetricKey]) -> Vec<f64> {
        self.values.aligned(metrics)
    }
}

// ---------------------------------------------------------------------------
// ComparisonSet
// ---------------------------------------------------------------------------

/// Exactly two entities compared side by side. Slot 0 is always the first
/// entity of the input collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSet {
    entities: [EntityRecord; 2],
}

impl ComparisonSet {
    /// Build a pair from a collection that must hold exactly two records.
    pub fn from_records(records: Vec<EntityRecord>) -> Result<Self, ViewError> {
        let count = records.len();
        let entities: [EntityRecord; 2] = records.try_into().map_err(|_| {
            ViewError::Validation(format!(
                "comparison needs exactly 2 entities, got {count}"
            ))
        })?;
        Ok(ComparisonSet { entities })
    }

    pub fn entities(&self) -> &[EntityRecord; 2] {
        &self.entities
    }

    /// Entity in the given slot (0 or 1).
    pub fn slot(&self, slot: usize) -> Option<&EntityRecord> {
        self.entities.get(slot)
    }
}

// ---------------------------------------------------------------------------
// ProjectionRecord
// ---------------------------------------------------------------------------

/// A player with two projection sources per metric: the heuristic values
/// carried in the payload and the model values fetched afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRecord {
    /// Identity plus heuristic projections.
    pub record: EntityRecord,
    /// Model projections. Zero until a fetch succeeds.
    pub model: MetricValues,
}

impl ProjectionRecord {
    pub fn new(record: EntityRecord) -> Self {
        ProjectionRecord {
            record,
            model: MetricValues::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn heuristic(&self, key: MetricKey) -> f64 {
        self.record.value(key)
    }

    pub fn model(&self, key: MetricKey) -> f64 {
        self.model.get(key)
    }

    pub fn set_model(&mut self, key: MetricKey, value: f64) {
        self.model.set(key, value);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
