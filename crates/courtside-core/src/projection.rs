// Projection view: heuristic vs model season projections for many players.
//
// The view is initialized once (model values fetched and joined), then every
// control change recomputes the single line chart in place from local data.

use tracing::{debug, info};

use crate::chart::{slot_color, ChartKind, ChartSpec, Series, SeriesPaint};
use crate::entity::ProjectionRecord;
use crate::error::ViewError;
use crate::fetch::{gather_model_values, ModelSource};
use crate::metric::{MetricKey, PROJECTION_STATS};

/// Regular-season length used by the heuristic projection.
pub const SEASON_GAMES: u32 = 82;

/// Project a per-game average over the games left in the season, rounded to
/// one decimal. Players past the season length project to zero.
pub fn project_season_remaining(per_game: f64, games_played: u32) -> f64 {
    let remaining = SEASON_GAMES.saturating_sub(games_played);
    (per_game * remaining as f64 * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Which projection series are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Heuristic,
    Model,
    Both,
}

impl DisplayMode {
    pub fn from_str_mode(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" => Some(DisplayMode::Heuristic),
            "ml" | "model" => Some(DisplayMode::Model),
            "both" => Some(DisplayMode::Both),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Heuristic => "heuristic",
            DisplayMode::Model => "ml",
            DisplayMode::Both => "both",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            DisplayMode::Heuristic => DisplayMode::Model,
            DisplayMode::Model => DisplayMode::Both,
            DisplayMode::Both => DisplayMode::Heuristic,
        }
    }
}

/// Group (team) filter applied to the player list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Group(u64),
}

impl GroupFilter {
    pub fn matches(&self, group: Option<u64>) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(id) => group == Some(*id),
        }
    }
}

/// A selectable group, e.g. an NBA team.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: u64,
    pub full_name: String,
    pub abbreviation: Option<String>,
}

impl Group {
    /// Selector label: the abbreviation when present, else the full name.
    pub fn label(&self) -> &str {
        match self.abbreviation.as_deref() {
            Some(abbr) if !abbr.is_empty() => abbr,
            _ => &self.full_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionControls {
    pub group: GroupFilter,
    pub stat: MetricKey,
    pub mode: DisplayMode,
}

impl Default for ProjectionControls {
    fn default() -> Self {
        ProjectionControls {
            group: GroupFilter::All,
            stat: MetricKey::Points,
            mode: DisplayMode::Heuristic,
        }
    }
}

/// One user-driven control change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChange {
    Group(GroupFilter),
    Stat(MetricKey),
    Mode(DisplayMode),
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Initial data for the projection screen, as handed over by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPayload {
    pub players: Vec<ProjectionRecord>,
    pub groups: Vec<Group>,
    pub selected_group: Option<u64>,
    pub mode: DisplayMode,
}

// ---------------------------------------------------------------------------
// ProjectionView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ProjectionView {
    records: Vec<ProjectionRecord>,
    groups: Vec<Group>,
    controls: ProjectionControls,
    chart: ChartSpec,
}

impl ProjectionView {
    /// Fetch model values for every player, wait for all of them to settle,
    /// then build the chart.
    pub async fn initialize<S>(payload: ProjectionPayload, source: &S) -> Result<Self, ViewError>
    where
        S: ModelSource + ?Sized,
    {
        let ProjectionPayload {
            mut players,
            groups,
            selected_group,
            mode,
        } = payload;

        if players.is_empty() {
            return Err(ViewError::Validation(
                "projection payload contains no players".into(),
            ));
        }

        gather_model_values(source, &mut players).await;

        let controls = ProjectionControls {
            group: selected_group.map_or(GroupFilter::All, GroupFilter::Group),
            stat: MetricKey::Points,
            mode,
        };
        Ok(ProjectionView::from_resolved(players, groups, controls))
    }

    /// Build a view from records whose model values are already final.
    pub fn from_resolved(
        records: Vec<ProjectionRecord>,
        groups: Vec<Group>,
        controls: ProjectionControls,
    ) -> Self {
        let mut view = ProjectionView {
            records,
            groups,
            controls,
            chart: ChartSpec {
                kind: ChartKind::Line,
                title: String::new(),
                labels: Vec::new(),
                series: vec![
                    Series::new(String::new(), Vec::new(), SeriesPaint::Solid(slot_color(0))),
                    Series::new(String::new(), Vec::new(), SeriesPaint::Solid(slot_color(1))),
                ],
            },
        };
        view.chart.series[0].dashed = true;
        view.refresh();
        info!(
            "projection view ready: {} players, {} groups",
            view.records.len(),
            view.groups.len()
        );
        view
    }

    /// Apply one control change and recompute the chart in place.
    pub fn apply(&mut self, change: ControlChange) {
        match change {
            ControlChange::Group(g) => self.controls.group = g,
            ControlChange::Stat(s) => self.controls.stat = s,
            ControlChange::Mode(m) => self.controls.mode = m,
        }
        debug!(?change, "projection control changed");
        self.refresh();
    }

    /// Recompute labels, data, visibility, series names and title from the
    /// current controls.
    fn refresh(&mut self) {
        let ProjectionControls { group, stat, mode } = self.controls;
        let shown: Vec<&ProjectionRecord> = self
            .records
            .iter()
            .filter(|r| group.matches(r.record.group))
            .collect();

        let chart = &mut self.chart;
        chart.labels = shown.iter().map(|r| r.name().to_string()).collect();

        let heuristic = &mut chart.series[0];
        heuristic.data = shown.iter().map(|r| r.heuristic(stat)).collect();
        heuristic.hidden = mode == DisplayMode::Model;
        heuristic.name = format!("Heuristic {stat}");

        let model = &mut chart.series[1];
        model.data = shown.iter().map(|r| r.model(stat)).collect();
        model.hidden = mode == DisplayMode::Heuristic;
        model.name = format!("ML {stat}");

        chart.title = format!("{stat} Projection");
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn controls(&self) -> ProjectionControls {
        self.controls
    }

    pub fn records(&self) -> &[ProjectionRecord] {
        &self.records
    }

    /// Group selector options: "All Teams" followed by each group.
    pub fn group_options(&self) -> Vec<(GroupFilter, String)> {
        let mut options = vec![(GroupFilter::All, "All Teams".to_string())];
        options.extend(
            self.groups
                .iter()
                .map(|g| (GroupFilter::Group(g.id), g.label().to_string())),
        );
        options
    }

    /// Label of the active group filter.
    pub fn group_label(&self) -> String {
        self.group_options()
            .into_iter()
            .find(|(f, _)| *f == self.controls.group)
            .map(|(_, label)| label)
            .unwrap_or_else(|| match self.controls.group {
                GroupFilter::All => "All Teams".to_string(),
                GroupFilter::Group(id) => format!("Team {id}"),
            })
    }

    /// Select the next (or previous) group option, wrapping around.
    pub fn cycle_group(&mut self, forward: bool) {
        let options = self.group_options();
        let len = options.len();
        let current = options
            .iter()
            .position(|(f, _)| *f == self.controls.group)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.apply(ControlChange::Group(options[next].0));
    }

    /// Select the next projection stat, wrapping around.
    pub fn cycle_stat(&mut self) {
        let current = PROJECTION_STATS
            .iter()
            .position(|s| *s == self.controls.stat)
            .unwrap_or(0);
        let next = PROJECTION_STATS[(current + 1) % PROJECTION_STATS.len()];
        self.apply(ControlChange::Stat(next));
    }

    pub fn cycle_mode(&mut self) {
        let next = self.controls.mode.next();
        self.apply(ControlChange::Mode(next));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
