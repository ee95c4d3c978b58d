// Line chart: x is the label index, y the series value. Dashed series are
// drawn with the dot marker, solid ones with braille.

use courtside_core::chart::{ChartSpec, Series};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

use super::{chart_block, format_value, render_message, to_color};

/// Longest x-axis label before truncation.
const LABEL_CHARS: usize = 10;
/// Above this many points only the first, middle and last labels are shown.
const MAX_X_LABELS: usize = 8;

/// Upper y bound: 10% headroom over `max`, at least 1.
pub fn y_upper(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn short(label: &str) -> String {
    if label.chars().count() <= LABEL_CHARS {
        label.to_string()
    } else {
        let cut: String = label.chars().take(LABEL_CHARS - 1).collect();
        format!("{cut}…")
    }
}

/// X-axis labels, spread evenly over the axis by ratatui.
pub fn x_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        n if n <= MAX_X_LABELS => labels.iter().map(|l| short(l)).collect(),
        n => vec![
            short(&labels[0]),
            short(&labels[n / 2]),
            short(&labels[n - 1]),
        ],
    }
}

pub fn render(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    if spec.labels.is_empty() {
        render_message(frame, area, &spec.title, "No data", Color::DarkGray);
        return;
    }

    let series: Vec<&Series> = spec.visible_series().collect();
    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.data
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&points)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(if s.dashed { Marker::Dot } else { Marker::Braille })
                .graph_type(if data.len() == 1 {
                    GraphType::Scatter
                } else {
                    GraphType::Line
                })
                .style(Style::default().fg(to_color(s.paint.color_at(0))))
                .data(data)
        })
        .collect();

    let x_max = (spec.labels.len().saturating_sub(1)).max(1) as f64;
    let y_max = y_upper(spec.max_value());
    let axis_style = Style::default().fg(Color::DarkGray);

    let chart = Chart::new(datasets)
        .block(chart_block(&spec.title))
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(x_labels(&spec.labels)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(vec![
                    format_value(0.0),
                    format_value(y_max / 2.0),
                    format_value(y_max),
                ]),
        );
    frame.render_widget(chart, area);
}
