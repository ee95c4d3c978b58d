// Doughnut chart: a canvas ring split into one arc per label, colored from
// the series' segment palette, with a value/share legend beside it.

use std::f64::consts::{FRAC_PI_2, TAU};

use courtside_core::chart::{ChartSpec, Series};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{chart_block, format_value, render_message, to_color};

const INNER_RADIUS: f64 = 0.55;
const OUTER_RADIUS: f64 = 1.0;
const RADIAL_STEP: f64 = 0.04;
const ANGULAR_STEP: f64 = 0.015;

/// Each value's share of the positive total, or `None` when nothing is
/// positive.
pub fn shares(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    Some(values.iter().map(|v| v.max(0.0) / total).collect())
}

/// Ring points of the arc covering `[start, start + sweep)` of a full turn,
/// measured clockwise from the top.
pub fn arc_points(start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let begin = start * TAU;
    let end = (start + sweep) * TAU;
    let mut r = INNER_RADIUS;
    while r <= OUTER_RADIUS {
        let mut a = begin;
        while a < end {
            let angle = FRAC_PI_2 - a;
            points.push((angle.cos() * r, angle.sin() * r));
            a += ANGULAR_STEP;
        }
        r += RADIAL_STEP;
    }
    points
}

fn legend(series: &Series, labels: &[String], shares: Option<&[f64]>) -> Vec<Line<'static>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = series.data.get(i).copied().unwrap_or(0.0);
            let pct = shares
                .and_then(|s| s.get(i))
                .map(|s| format!("{:>3.0}%", s * 100.0))
                .unwrap_or_else(|| "  -".to_string());
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(to_color(series.paint.color_at(i)))),
                Span::raw(format!("{label:<4} {:>7} ", format_value(value))),
                Span::styled(pct, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let Some(series) = spec.visible_series().next() else {
        render_message(frame, area, &spec.title, "No data", Color::DarkGray);
        return;
    };
    if spec.labels.is_empty() {
        render_message(frame, area, &spec.title, "No data", Color::DarkGray);
        return;
    }

    let block = chart_block(&spec.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [ring_area, legend_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(inner);

    let values: Vec<f64> = (0..spec.labels.len())
        .map(|i| series.data.get(i).copied().unwrap_or(0.0))
        .collect();
    let shares = shares(&values);

    // Widen the x range so the ring stays round on ~1:2 terminal cells.
    let x_scale = if ring_area.height == 0 {
        1.0
    } else {
        (ring_area.width as f64 / (2.0 * ring_area.height as f64)).max(1.0)
    };
    let arcs: Vec<(Vec<(f64, f64)>, Color)> = match &shares {
        Some(shares) => {
            let mut start = 0.0;
            shares
                .iter()
                .enumerate()
                .map(|(i, share)| {
                    let arc = arc_points(start, *share);
                    start += share;
                    (arc, to_color(series.paint.color_at(i)))
                })
                .collect()
        }
        None => Vec::new(),
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.1 * x_scale, 1.1 * x_scale])
        .y_bounds([-1.1, 1.1])
        .paint(move |ctx| {
            if arcs.is_empty() {
                ctx.print(-0.3, 0.0, Span::styled("No data", Style::default().fg(Color::DarkGray)));
                return;
            }
            for (coords, color) in &arcs {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, ring_area);

    let mut lines = vec![Line::from(Span::styled(
        series.name.clone(),
        Style::default().fg(Color::White),
    ))];
    lines.extend(legend(series, &spec.labels, shares.as_deref()));
    frame.render_widget(Paragraph::new(lines), legend_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{buffer_text, fixtures};
    use courtside_core::chart::ChartKind;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn shares_sum_to_one() {
        let s = shares(&[30.0, 10.0, 0.0]).unwrap();
        assert_eq!(s, vec![0.75, 0.25, 0.0]);
    }

    #[test]
    fn negative_values_count_as_zero() {
        let s = shares(&[-5.0, 5.0]).unwrap();
        assert_eq!(s, vec![0.0, 1.0]);
    }

    #[test]
    fn all_zero_has_no_shares() {
        assert!(shares(&[0.0, 0.0]).is_none());
        assert!(shares(&[]).is_none());
    }

    #[test]
    fn arc_points_stay_in_ring() {
        let points = arc_points(0.0, 0.25);
        assert!(!points.is_empty());
        for (x, y) in points {
            let r = (x * x + y * y).sqrt();
            assert!(r >= INNER_RADIUS - 1e-9 && r <= OUTER_RADIUS + 1e-9);
            // First quarter clockwise from the top lies in the upper right.
            assert!(x >= -1e-9 && y >= -1e-9);
        }
    }

    #[test]
    fn empty_sweep_has_no_points() {
        assert!(arc_points(0.5, 0.0).is_empty());
    }

    #[test]
    fn renders_title_and_legend_with_shares() {
        let spec = fixtures::spec(ChartKind::Doughnut);
        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &spec))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Lakers Stat Breakdown"));
        assert!(text.contains("117.2"));
        assert!(text.contains("REB"));
        assert!(text.contains('%'));
    }

    #[test]
    fn all_zero_values_render_placeholder() {
        let mut spec = fixtures::spec(ChartKind::Doughnut);
        for v in &mut spec.series[0].data {
            *v = 0.0;
        }
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &spec))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No data"));
    }
}
