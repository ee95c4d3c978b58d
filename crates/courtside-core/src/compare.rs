// Paired comparison view: two players or two teams across several charts.
//
// On construction the view builds one chart instance per recognized surface
// that is mounted. Switching the chart kind afterwards only flips visibility
// flags; specs are never rebuilt by a switch.

use std::collections::HashSet;

use tracing::{error, info, warn};

use crate::chart::{ChartKind, ChartSelector, ChartSpec};
use crate::entity::{ComparisonSet, EntityRecord};
use crate::error::ViewError;
use crate::metric::MetricKey;

// ---------------------------------------------------------------------------
// Variants and surfaces
// ---------------------------------------------------------------------------

/// Which kind of subject is being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Players,
    Teams,
}

impl Variant {
    /// Singular noun used in chart titles.
    pub fn subject(&self) -> &'static str {
        match self {
            Variant::Players => "Player",
            Variant::Teams => "Team",
        }
    }

    /// Surfaces this variant knows how to fill, in render order.
    pub fn bindings(&self) -> &'static [SurfaceBinding] {
        match self {
            Variant::Players => PLAYER_BINDINGS,
            Variant::Teams => TEAM_BINDINGS,
        }
    }
}

/// What a surface shows: both entities, or one entity's breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTarget {
    Pair,
    Slot(usize),
}

/// A recognized mount point and the chart it hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceBinding {
    pub id: &'static str,
    pub kind: ChartKind,
    pub target: SurfaceTarget,
}

const PLAYER_BINDINGS: &[SurfaceBinding] = &[
    SurfaceBinding {
        id: "playerComparisonChart",
        kind: ChartKind::Bar,
        target: SurfaceTarget::Pair,
    },
    SurfaceBinding {
        id: "radarChart",
        kind: ChartKind::Radar,
        target: SurfaceTarget::Pair,
    },
    SurfaceBinding {
        id: "lineChart",
        kind: ChartKind::Line,
        target: SurfaceTarget::Pair,
    },
];

const TEAM_BINDINGS: &[SurfaceBinding] = &[
    SurfaceBinding {
        id: "teamComparisonChart",
        kind: ChartKind::StackedBar,
        target: SurfaceTarget::Pair,
    },
    SurfaceBinding {
        id: "radarChart",
        kind: ChartKind::Radar,
        target: SurfaceTarget::Pair,
    },
    SurfaceBinding {
        id: "team1Doughnut",
        kind: ChartKind::Doughnut,
        target: SurfaceTarget::Slot(0),
    },
    SurfaceBinding {
        id: "team2Doughnut",
        kind: ChartKind::Doughnut,
        target: SurfaceTarget::Slot(1),
    },
];

/// The set of surface ids present in the current screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoints {
    ids: HashSet<String>,
}

impl MountPoints {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MountPoints {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Every surface any variant recognizes.
    pub fn all() -> Self {
        MountPoints::new(
            PLAYER_BINDINGS
                .iter()
                .chain(TEAM_BINDINGS.iter())
                .map(|b| b.id),
        )
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

// ---------------------------------------------------------------------------
// ComparisonView
// ---------------------------------------------------------------------------

/// A constructed chart bound to its surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub surface: String,
    pub spec: ChartSpec,
    pub visible: bool,
}

impl ChartInstance {
    pub fn selector(&self) -> ChartSelector {
        self.spec.kind.selector()
    }
}

#[derive(Debug, Clone)]
pub struct ComparisonView {
    variant: Variant,
    set: ComparisonSet,
    metrics: Vec<MetricKey>,
    instances: Vec<ChartInstance>,
    selected: ChartSelector,
    skipped: Vec<ViewError>,
}

impl ComparisonView {
    /// Build every chart this variant can place on the mounted surfaces.
    ///
    /// Fails with `ViewError::Validation` when `records` does not hold exactly
    /// two entities or `metrics` is empty; nothing is constructed in that case.
    /// Unmounted surfaces are recorded as `ViewError::MissingSurface` and
    /// skipped.
    pub fn new(
        variant: Variant,
        records: Vec<EntityRecord>,
        metrics: Vec<MetricKey>,
        mounts: &MountPoints,
        default_selector: ChartSelector,
    ) -> Result<Self, ViewError> {
        let set = match ComparisonSet::from_records(records) {
            Ok(set) => set,
            Err(e) => {
                error!("{} comparison not rendered: {}", variant.subject(), e);
                return Err(e);
            }
        };
        if metrics.is_empty() {
            let e = ViewError::Validation("at least one metric is required".into());
            error!("{} comparison not rendered: {}", variant.subject(), e);
            return Err(e);
        }

        let mut instances = Vec::new();
        let mut skipped = Vec::new();

        for binding in variant.bindings() {
            if !mounts.contains(binding.id) {
                let e = ViewError::MissingSurface {
                    surface: binding.id.to_string(),
                    kind: binding.kind,
                };
                warn!("{}", e);
                skipped.push(e);
                continue;
            }

            let spec = match binding.target {
                SurfaceTarget::Pair => ChartSpec::comparison(
                    binding.kind,
                    &set,
                    &metrics,
                    format!(
                        "{} Comparison ({})",
                        variant.subject(),
                        binding.kind.title_suffix()
                    ),
                ),
                SurfaceTarget::Slot(slot) => match set.slot(slot) {
                    Some(entity) => ChartSpec::breakdown(entity, slot, &metrics),
                    None => continue,
                },
            };

            instances.push(ChartInstance {
                surface: binding.id.to_string(),
                spec,
                visible: false,
            });
        }

        info!(
            "{} comparison built: {} chart(s), {} surface(s) skipped",
            variant.subject(),
            instances.len(),
            skipped.len()
        );

        let mut view = ComparisonView {
            variant,
            set,
            metrics,
            instances,
            selected: default_selector,
            skipped,
        };
        view.show(default_selector);
        Ok(view)
    }

    /// Make the charts answering to `selector` visible and hide the rest.
    pub fn show(&mut self, selector: ChartSelector) {
        self.selected = selector;
        let mut any = false;
        for instance in &mut self.instances {
            instance.visible = instance.selector() == selector;
            any |= instance.visible;
        }
        if !any {
            warn!(
                "no {} chart mounted for {} comparison",
                selector,
                self.variant.subject()
            );
        }
    }

    /// Selectors that have at least one chart instance, in surface order.
    pub fn available_selectors(&self) -> Vec<ChartSelector> {
        let mut out: Vec<ChartSelector> = Vec::new();
        for instance in &self.instances {
            let sel = instance.selector();
            if !out.contains(&sel) {
                out.push(sel);
            }
        }
        out
    }

    /// Advance to the next available selector, wrapping around.
    pub fn cycle(&mut self) {
        let available = self.available_selectors();
        if available.is_empty() {
            return;
        }
        let next = match available.iter().position(|s| *s == self.selected) {
            Some(i) => available[(i + 1) % available.len()],
            None => available[0],
        };
        self.show(next);
    }

    pub fn selected(&self) -> ChartSelector {
        self.selected
    }

    pub fn visible(&self) -> impl Iterator<Item = &ChartInstance> {
        self.instances.iter().filter(|i| i.visible)
    }

    pub fn instances(&self) -> &[ChartInstance] {
        &self.instances
    }

    pub fn instance(&self, surface: &str) -> Option<&ChartInstance> {
        self.instances.iter().find(|i| i.surface == surface)
    }

    /// Surfaces that were recognized but not mounted.
    pub fn skipped(&self) -> &[ViewError] {
        &self.skipped
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn set(&self) -> &ComparisonSet {
        &self.set
    }

    pub fn metrics(&self) -> &[MetricKey] {
        &self.metrics
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
