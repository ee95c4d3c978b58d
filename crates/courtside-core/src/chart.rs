// Renderer-agnostic chart descriptions.
//
// A `ChartSpec` is everything a renderer needs: kind, title, ordered labels,
// and named series with a fixed color per comparison slot. Specs are cheap to
// derive and are rebuilt rather than patched, except for the projection line
// chart which is updated in place.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::entity::{ComparisonSet, EntityRecord};
use crate::metric::MetricKey;

// ---------------------------------------------------------------------------
// Kinds and selectors
// ---------------------------------------------------------------------------

/// Chart shapes a view can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Radar,
    Line,
    Doughnut,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::StackedBar => "stacked-bar",
            ChartKind::Radar => "radar",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
        }
    }

    /// Suffix used in chart titles, e.g. "Radar Chart".
    pub fn title_suffix(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::StackedBar => "Stacked Bar Chart",
            ChartKind::Radar => "Radar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Doughnut => "Doughnut Chart",
        }
    }

    /// The selector option that shows this kind. Stacked bars answer to `bar`.
    pub fn selector(&self) -> ChartSelector {
        match self {
            ChartKind::Bar | ChartKind::StackedBar => ChartSelector::Bar,
            ChartKind::Radar => ChartSelector::Radar,
            ChartKind::Line => ChartSelector::Line,
            ChartKind::Doughnut => ChartSelector::Doughnut,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option values of the chart-kind selector control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSelector {
    #[default]
    Bar,
    Radar,
    Line,
    Doughnut,
}

impl ChartSelector {
    pub const ALL: [ChartSelector; 4] = [
        ChartSelector::Bar,
        ChartSelector::Radar,
        ChartSelector::Line,
        ChartSelector::Doughnut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartSelector::Bar => "bar",
            ChartSelector::Radar => "radar",
            ChartSelector::Line => "line",
            ChartSelector::Doughnut => "doughnut",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "bar" => Some(ChartSelector::Bar),
            "radar" => Some(ChartSelector::Radar),
            "line" => Some(ChartSelector::Line),
            "doughnut" => Some(ChartSelector::Doughnut),
            _ => None,
        }
    }
}

impl fmt::Display for ChartSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// CSS color string with the given alpha, e.g. `rgba(255,99,132,0.5)`.
    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

pub const WARM: Rgb = Rgb::new(255, 99, 132);
pub const COOL: Rgb = Rgb::new(54, 162, 235);
const ORANGE: Rgb = Rgb::new(255, 159, 64);
const YELLOW: Rgb = Rgb::new(255, 205, 86);
const TEAL: Rgb = Rgb::new(75, 192, 192);
const PURPLE: Rgb = Rgb::new(153, 102, 255);
const GREY: Rgb = Rgb::new(201, 203, 207);

/// Series color for a comparison slot: slot 0 warm, slot 1 cool.
pub fn slot_color(slot: usize) -> Rgb {
    if slot % 2 == 0 {
        WARM
    } else {
        COOL
    }
}

/// Segment colors for a single-entity breakdown, led by the slot color.
pub fn segment_palette(slot: usize) -> [Rgb; 6] {
    if slot % 2 == 0 {
        [WARM, ORANGE, YELLOW, TEAL, PURPLE, GREY]
    } else {
        [COOL, TEAL, PURPLE, YELLOW, ORANGE, WARM]
    }
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// How a series is colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesPaint {
    /// One color for the whole series (bar, line, radar).
    Solid(Rgb),
    /// One color per label (doughnut segments).
    Segments(Vec<Rgb>),
}

impl SeriesPaint {
    /// Color of the `index`-th data point.
    pub fn color_at(&self, index: usize) -> Rgb {
        match self {
            SeriesPaint::Solid(c) => *c,
            SeriesPaint::Segments(colors) if !colors.is_empty() => colors[index % colors.len()],
            SeriesPaint::Segments(_) => GREY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// One value per chart label.
    pub data: Vec<f64>,
    pub paint: SeriesPaint,
    pub hidden: bool,
    pub dashed: bool,
    /// Stack group for stacked bars.
    pub stack: Option<String>,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<f64>, paint: SeriesPaint) -> Self {
        Series {
            name: name.into(),
            data,
            paint,
            hidden: false,
            dashed: false,
            stack: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Chart of both entities of a pair over `metrics`, one series per slot.
    pub fn comparison(
        kind: ChartKind,
        set: &ComparisonSet,
        metrics: &[MetricKey],
        title: impl Into<String>,
    ) -> Self {
        let series = set
            .entities()
            .iter()
            .enumerate()
            .map(|(slot, entity)| {
                let mut s = Series::new(
                    entity.name.clone(),
                    entity.series(metrics),
                    SeriesPaint::Solid(slot_color(slot)),
                );
                if kind == ChartKind::StackedBar {
                    s.stack = Some("Stack 0".to_string());
                }
                s
            })
            .collect();

        ChartSpec {
            kind,
            title: title.into(),
            labels: metric_labels(metrics),
            series,
        }
    }

    /// Doughnut breakdown of one entity's metrics.
    pub fn breakdown(entity: &EntityRecord, slot: usize, metrics: &[MetricKey]) -> Self {
        let palette = segment_palette(slot).to_vec();
        ChartSpec {
            kind: ChartKind::Doughnut,
            title: format!("{} Stat Breakdown", entity.name),
            labels: metric_labels(metrics),
            series: vec![Series::new(
                entity.name.clone(),
                entity.series(metrics),
                SeriesPaint::Segments(palette),
            )],
        }
    }

    pub fn visible_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| !s.hidden)
    }

    /// Largest value across visible series, or 0.0 when empty.
    ///
    /// For stacked bars this is the largest per-label stack total.
    pub fn max_value(&self) -> f64 {
        if self.kind == ChartKind::StackedBar {
            return (0..self.labels.len())
                .map(|i| {
                    self.visible_series()
                        .map(|s| s.data.get(i).copied().unwrap_or(0.0))
                        .sum::<f64>()
                })
                .fold(0.0, f64::max);
        }
        self.visible_series()
            .flat_map(|s| s.data.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Chart.js configuration object equivalent to this spec.
    pub fn to_chartjs(&self) -> Value {
        let chart_type = match self.kind {
            ChartKind::Bar | ChartKind::StackedBar => "bar",
            ChartKind::Radar => "radar",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
        };

        let datasets: Vec<Value> = self.series.iter().map(|s| dataset_json(self.kind, s)).collect();

        let scales = match self.kind {
            ChartKind::Bar | ChartKind::Line => json!({ "y": { "beginAtZero": true } }),
            ChartKind::StackedBar => json!({
                "x": { "stacked": true },
                "y": { "stacked": true, "beginAtZero": true }
            }),
            ChartKind::Radar => json!({ "r": { "beginAtZero": true } }),
            ChartKind::Doughnut => json!({}),
        };

        json!({
            "type": chart_type,
            "data": {
                "labels": self.labels,
                "datasets": datasets,
            },
            "options": {
                "responsive": true,
                "plugins": {
                    "title": { "display": true, "text": self.title }
                },
                "scales": scales,
            }
        })
    }
}

fn metric_labels(metrics: &[MetricKey]) -> Vec<String> {
    metrics.iter().map(|m| m.as_str().to_string()).collect()
}

fn dataset_json(kind: ChartKind, series: &Series) -> Value {
    let mut ds = json!({
        "label": series.name,
        "data": series.data,
        "hidden": series.hidden,
    });
    let obj = match ds.as_object_mut() {
        Some(obj) => obj,
        None => return ds,
    };

    match &series.paint {
        SeriesPaint::Solid(c) => {
            let (fill_alpha, fill) = match kind {
                ChartKind::Radar => (0.2, true),
                ChartKind::Line => (0.2, false),
                ChartKind::StackedBar => (0.6, false),
                _ => (0.5, false),
            };
            obj.insert("backgroundColor".into(), json!(c.rgba(fill_alpha)));
            obj.insert("borderColor".into(), json!(c.rgba(1.0)));
            if matches!(kind, ChartKind::Radar | ChartKind::Line) {
                obj.insert("fill".into(), json!(fill));
            }
            if kind == ChartKind::Radar {
                obj.insert("pointBackgroundColor".into(), json!(c.rgba(1.0)));
            }
        }
        SeriesPaint::Segments(colors) => {
            let bg: Vec<String> = colors.iter().map(|c| c.rgba(0.6)).collect();
            obj.insert("backgroundColor".into(), json!(bg));
        }
    }
    if series.dashed {
        obj.insert("borderDash".into(), json!([5, 5]));
    }
    if let Some(stack) = &series.stack {
        obj.insert("stack".into(), json!(stack));
    }
    ds
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> ComparisonSet {
        ComparisonSet::from_records(vec![
            EntityRecord::new("A")
                .with_value(MetricKey::Points, 20.0)
                .with_value(MetricKey::Rebounds, 5.0)
                .with_value(MetricKey::Assists, 3.0),
            EntityRecord::new("B")
                .with_value(MetricKey::Points, 18.0)
                .with_value(MetricKey::Rebounds, 9.0)
                .with_value(MetricKey::Assists, 1.0),
        ])
        .unwrap()
    }

    const PRA: [MetricKey; 3] = [MetricKey::Points, MetricKey::Rebounds, MetricKey::Assists];

    #[test]
    fn comparison_bar_matches_inputs() {
        let spec = ChartSpec::comparison(ChartKind::Bar, &pair(), &PRA, "t");
        assert_eq!(spec.labels, vec!["PTS", "REB", "AST"]);
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].name, "A");
        assert_eq!(spec.series[0].data, vec![20.0, 5.0, 3.0]);
        assert_eq!(spec.series[1].name, "B");
        assert_eq!(spec.series[1].data, vec![18.0, 9.0, 1.0]);
    }

    #[test]
    fn slot_colors_are_fixed_across_kinds() {
        for kind in [ChartKind::Bar, ChartKind::Radar, ChartKind::Line, ChartKind::StackedBar] {
            let spec = ChartSpec::comparison(kind, &pair(), &PRA, "t");
            assert_eq!(spec.series[0].paint, SeriesPaint::Solid(WARM));
            assert_eq!(spec.series[1].paint, SeriesPaint::Solid(COOL));
        }
    }

    #[test]
    fn stacked_bar_sets_stack_and_sums_max() {
        let spec = ChartSpec::comparison(ChartKind::StackedBar, &pair(), &PRA, "t");
        assert!(spec.series.iter().all(|s| s.stack.as_deref() == Some("Stack 0")));
        assert_eq!(spec.max_value(), 38.0);
    }

    #[test]
    fn max_value_ignores_hidden() {
        let mut spec = ChartSpec::comparison(ChartKind::Bar, &pair(), &PRA, "t");
        assert_eq!(spec.max_value(), 20.0);
        spec.series[0].hidden = true;
        assert_eq!(spec.max_value(), 18.0);
    }

    #[test]
    fn breakdown_uses_slot_palette() {
        let set = pair();
        let spec = ChartSpec::breakdown(set.slot(1).unwrap(), 1, &PRA);
        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.title, "B Stat Breakdown");
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].paint.color_at(0), COOL);
    }

    #[test]
    fn selector_mapping() {
        assert_eq!(ChartKind::StackedBar.selector(), ChartSelector::Bar);
        assert_eq!(ChartKind::Bar.selector(), ChartSelector::Bar);
        assert_eq!(ChartSelector::from_id("Radar"), Some(ChartSelector::Radar));
        assert_eq!(ChartSelector::from_id("pie"), None);
        assert_eq!(ChartSelector::default(), ChartSelector::Bar);
    }

    #[test]
    fn rgba_formatting() {
        assert_eq!(WARM.rgba(0.5), "rgba(255,99,132,0.5)");
        assert_eq!(COOL.rgba(1.0), "rgba(54,162,235,1)");
    }

    #[test]
    fn chartjs_export_carries_labels_and_data() {
        let spec = ChartSpec::comparison(ChartKind::StackedBar, &pair(), &PRA, "Team Comparison");
        let v = spec.to_chartjs();
        assert_eq!(v["type"], "bar");
        assert_eq!(v["data"]["labels"], json!(["PTS", "REB", "AST"]));
        assert_eq!(v["data"]["datasets"][0]["data"], json!([20.0, 5.0, 3.0]));
        assert_eq!(v["data"]["datasets"][1]["label"], "B");
        assert_eq!(v["data"]["datasets"][0]["stack"], "Stack 0");
        assert_eq!(v["options"]["scales"]["x"]["stacked"], true);
        assert_eq!(v["options"]["plugins"]["title"]["text"], "Team Comparison");
    }

    #[test]
    fn chartjs_fill_alpha_follows_chart_kind() {
        let set = pair();
        let fill = |kind| {
            ChartSpec::comparison(kind, &set, &PRA, "t").to_chartjs()["data"]["datasets"][0]
                ["backgroundColor"]
                .clone()
        };
        assert_eq!(fill(ChartKind::StackedBar), "rgba(255,99,132,0.6)");
        assert_eq!(fill(ChartKind::Bar), "rgba(255,99,132,0.5)");
        assert_eq!(fill(ChartKind::Radar), "rgba(255,99,132,0.2)");
    }

    #[test]
    fn default_selector_is_bar() {
        assert_eq!(ChartSelector::default(), ChartSelector::Bar);
    }

    #[test]
    fn chartjs_doughnut_has_segment_colors() {
        let set = pair();
        let spec = ChartSpec::breakdown(set.slot(0).unwrap(), 0, &PRA);
        let v = spec.to_chartjs();
        let bg = v["data"]["datasets"][0]["backgroundColor"].as_array().unwrap();
        assert_eq!(bg.len(), 6);
        assert_eq!(bg[0], "rgba(255,99,132,0.6)");
    }
}
