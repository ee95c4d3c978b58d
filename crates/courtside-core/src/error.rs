// Errors raised while building a comparison or projection view.

use thiserror::Error;

use crate::chart::ChartKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// The input cannot produce a view at all. Fatal for that view only.
    #[error("validation error: {0}")]
    Validation(String),

    /// A recognized mount point is absent. The chart is skipped; the other
    /// surfaces still render.
    #[error("rendering surface `{surface}` not found; skipping {kind} chart")]
    MissingSurface { surface: String, kind: ChartKind },
}

impl ViewError {
    /// Whether the view can continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ViewError::Validation(_))
    }
}
