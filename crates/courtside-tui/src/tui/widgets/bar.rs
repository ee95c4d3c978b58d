// Grouped bar chart: one bar group per metric, one bar per visible series.

use courtside_core::chart::{ChartSpec, Series};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Paragraph};
use ratatui::Frame;

use super::{chart_block, format_value, legend_line, render_message, to_color};

const GROUP_GAP: u16 = 2;
const MAX_BAR_WIDTH: u16 = 9;

/// Bar heights are integers; keep one decimal of precision.
fn scaled(v: f64) -> u64 {
    (v.max(0.0) * 10.0).round() as u64
}

/// Widest bar that lets `groups` groups of `per_group` bars fit in `width`.
pub fn bar_width(width: u16, groups: usize, per_group: usize) -> u16 {
    if groups == 0 || per_group == 0 {
        return 1;
    }
    let gaps = GROUP_GAP.saturating_mul(groups.saturating_sub(1) as u16);
    let bars = (groups * per_group) as u16;
    (width.saturating_sub(gaps) / bars.max(1)).clamp(1, MAX_BAR_WIDTH)
}

pub fn render(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let series: Vec<&Series> = spec.visible_series().collect();
    if spec.labels.is_empty() || series.is_empty() {
        render_message(frame, area, &spec.title, "No data", Color::DarkGray);
        return;
    }

    let block = chart_block(&spec.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [legend_area, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
    frame.render_widget(Paragraph::new(legend_line(spec)), legend_area);

    let bars: Vec<Vec<Bar>> = (0..spec.labels.len())
        .map(|i| {
            series
                .iter()
                .map(|s| {
                    let v = s.data.get(i).copied().unwrap_or(0.0);
                    let color = to_color(s.paint.color_at(i));
                    Bar::default()
                        .value(scaled(v))
                        .text_value(format_value(v))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(Color::Black).bg(color))
                })
                .collect()
        })
        .collect();

    let mut chart = BarChart::default()
        .bar_width(bar_width(chart_area.width, spec.labels.len(), series.len()))
        .bar_gap(0)
        .group_gap(GROUP_GAP)
        .max(scaled(spec.max_value()).max(1));
    for (label, group) in spec.labels.iter().zip(&bars) {
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(label.clone()))
                .bars(group),
        );
    }
    frame.render_widget(chart, chart_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{buffer_text, fixtures};
    use courtside_core::chart::ChartKind;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn scaled_keeps_one_decimal() {
        assert_eq!(scaled(24.4), 244);
        assert_eq!(scaled(0.05), 1);
        assert_eq!(scaled(-3.0), 0);
    }

    #[test]
    fn bar_width_fits_and_clamps() {
        // 3 groups of 2 bars in 80 columns: (80 - 4) / 6 = 12, clamped to 9.
        assert_eq!(bar_width(80, 3, 2), 9);
        assert_eq!(bar_width(20, 3, 2), 2);
        assert_eq!(bar_width(3, 6, 2), 1);
        assert_eq!(bar_width(80, 0, 2), 1);
    }

    #[test]
    fn renders_title_legend_and_labels() {
        let spec = fixtures::spec(ChartKind::Bar);
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &spec))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Player Comparison (Bar Chart)"));
        assert!(text.contains("Lakers"));
        assert!(text.contains("Warriors"));
        assert!(text.contains("PTS"));
        assert!(text.contains("AST"));
    }

    #[test]
    fn single_metric_renders() {
        let mut spec = fixtures::spec(ChartKind::Bar);
        spec.labels.truncate(1);
        for s in &mut spec.series {
            s.data.truncate(1);
        }
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &spec))
            .unwrap();
    }

    #[test]
    fn all_hidden_shows_no_data() {
        let mut spec = fixtures::spec(ChartKind::Bar);
        for s in &mut spec.series {
            s.hidden = true;
        }
        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &spec))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No data"));
    }
}
