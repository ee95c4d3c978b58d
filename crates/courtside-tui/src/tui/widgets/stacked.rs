// Stacked horizontal bars: one row per metric, each series a colored
// segment proportional to its share of the largest stack.

use courtside_core::chart::{ChartSpec, Series};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{chart_block, format_value, legend_line, render_message, to_color};

const LABEL_WIDTH: usize = 5;
const TOTAL_WIDTH: usize = 8;

/// Segment lengths for one stack, scaled so `max_total` fills `width` cells.
pub fn segment_lengths(values: &[f64], max_total: f64, width: usize) -> Vec<usize> {
    if max_total <= 0.0 {
        return vec![0; values.len()];
    }
    // Round the running edge so segments never overshoot the total's cells.
    let mut lengths = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    let mut drawn = 0;
    for v in values {
        acc += v.max(0.0);
        let edge = ((acc / max_total) * width as f64).round() as usize;
        let edge = edge.min(width);
        lengths.push(edge.saturating_sub(drawn));
        drawn = edge.max(drawn);
    }
    lengths
}

pub fn render(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let series: Vec<&Series> = spec.visible_series().collect();
    if spec.labels.is_empty() || series.is_empty() {
        render_message(frame, area, &spec.title, "No data", Color::DarkGray);
        return;
    }

    let block = chart_block(&spec.title);
    let inner = block.inner(area);
    let bar_space = (inner.width as usize).saturating_sub(LABEL_WIDTH + TOTAL_WIDTH + 1);
    let max_total = spec.max_value();

    let mut lines = vec![legend_line(spec), Line::default()];
    for (i, label) in spec.labels.iter().enumerate() {
        let values: Vec<f64> = series
            .iter()
            .map(|s| s.data.get(i).copied().unwrap_or(0.0))
            .collect();
        let total: f64 = values.iter().sum();

        let mut spans = vec![Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            Style::default().fg(Color::Gray),
        )];
        for (s, len) in series.iter().zip(segment_lengths(&values, max_total, bar_space)) {
            spans.push(Span::styled(
                "█".repeat(len),
                Style::default().fg(to_color(s.paint.color_at(i))),
            ));
        }
        spans.push(Span::styled(
            format!(" {:>width$}", format_value(total), width = TOTAL_WIDTH - 1),
            Style::default().fg(Color::White),
        ));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
