// Radar chart drawn on a braille canvas: one spoke per metric, one polygon
// per visible series, scaled to the largest visible value.

use std::f64::consts::{FRAC_PI_2, TAU};

use courtside_core::chart::{ChartSpec, Series};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{chart_block, legend_line, render_message, to_color};

/// Vertical half-extent of the canvas; spokes have length 1.0.
const EXTENT: f64 = 1.3;
const LABEL_RADIUS: f64 = 1.12;

/// Unit vector of spoke `i` of `n`, first spoke pointing up, clockwise.
pub fn spoke(i: usize, n: usize) -> (f64, f64) {
    let angle = FRAC_PI_2 - TAU * i as f64 / n.max(1) as f64;
    (angle.cos(), angle.sin())
}

/// Polygon vertices for one series, each value scaled by `max`.
pub fn vertices(data: &[f64], n: usize, max: f64) -> Vec<(f64, f64)> {
    let max = if max > 0.0 { max } else { 1.0 };
    (0..n)
        .map(|i| {
            let r = (data.get(i).copied().unwrap_or(0.0) / max).clamp(0.0, 1.0);
            let (x, y) = spoke(i, n);
            (x * r, y * r)
        })
        .collect()
}

fn draw_polygon(ctx: &mut Context, points: &[(f64, f64)], color: Color) {
    match points {
        [] => {}
        [only] => ctx.draw(&CanvasLine::new(0.0, 0.0, only.0, only.1, color)),
        _ => {
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                ctx.draw(&CanvasLine::new(a.0, a.1, b.0, b.1, color));
            }
        }
    }
}

/// Horizontal half-extent that keeps the chart round on ~1:2 terminal cells.
fn x_extent(area: Rect) -> f64 {
    if area.height == 0 {
        return EXTENT;
    }
    (EXTENT * area.width as f64 / (2.0 * area.height as f64)).max(EXTENT)
}

pub fn render(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let n = spec.labels.len();
    if n == 0 {
        render_message(frame, area, &spec.title, "No data", Color::DarkGray);
        return;
    }

    let block = chart_block(&spec.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [canvas_area, legend_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let max = spec.max_value();
    let series: Vec<&Series> = spec.visible_series().collect();
    let grid: Vec<Vec<(f64, f64)>> = [0.5, 1.0]
        .iter()
        .map(|level| vertices(&vec![*level; n], n, 1.0))
        .collect();
    let shapes: Vec<(Vec<(f64, f64)>, Color)> = series
        .iter()
        .map(|s| (vertices(&s.data, n, max), to_color(s.paint.color_at(0))))
        .collect();
    let xr = x_extent(canvas_area);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-xr, xr])
        .y_bounds([-EXTENT, EXTENT])
        .paint(move |ctx| {
            for i in 0..n {
                let (x, y) = spoke(i, n);
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, Color::DarkGray));
            }
            if n >= 3 {
                for ring in &grid {
                    draw_polygon(ctx, ring, Color::DarkGray);
                }
            }
            ctx.layer();
            for (points, color) in &shapes {
                draw_polygon(ctx, points, *color);
            }
            for (i, label) in spec.labels.iter().enumerate() {
                let (x, y) = spoke(i, n);
                ctx.print(
                    x * LABEL_RADIUS,
                    y * LABEL_RADIUS,
                    Span::styled(label.clone(), Style::default().fg(Color::Gray)),
                );
            }
        });
    frame.render_widget(canvas, canvas_area);
    frame.render_widget(Paragraph::new(legend_line(spec)), legend_area);
}
