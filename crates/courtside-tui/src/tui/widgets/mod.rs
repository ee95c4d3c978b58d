// TUI widget modules: one renderer per chart kind plus the dashboard chrome.

pub mod bar;
pub mod controls;
pub mod doughnut;
pub mod help_bar;
pub mod line;
pub mod radar;
pub mod screen;
pub mod stacked;
pub mod status_bar;

use courtside_core::chart::{ChartKind, ChartSpec, Rgb};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Draw `spec` with the renderer for its kind.
pub fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    match spec.kind {
        ChartKind::Bar => bar::render(frame, area, spec),
        ChartKind::StackedBar => stacked::render(frame, area, spec),
        ChartKind::Radar => radar::render(frame, area, spec),
        ChartKind::Line => line::render(frame, area, spec),
        ChartKind::Doughnut => doughnut::render(frame, area, spec),
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Bordered block with the chart title.
pub fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

/// One-decimal display of a stat value.
pub fn format_value(v: f64) -> String {
    format!("{v:.1}")
}

/// "■ name" entries for every visible series, in series order.
pub fn legend_line(spec: &ChartSpec) -> Line<'static> {
    let mut spans = Vec::new();
    for series in spec.visible_series() {
        let color = to_color(series.paint.color_at(0));
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::raw(series.name.clone()));
        if series.dashed {
            spans.push(Span::styled(" (dashed)", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

/// Bordered placeholder used for empty charts, loading and failed screens.
pub fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let paragraph = Paragraph::new(format!("  {message}"))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(chart_block(title));
    frame.render_widget(paragraph, area);
}

/// Collect every cell symbol of a rendered test buffer into one string.
#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn rgb_maps_to_terminal_color() {
        assert_eq!(
            to_color(courtside_core::chart::WARM),
            Color::Rgb(255, 99, 132)
        );
    }

    #[test]
    fn format_value_one_decimal() {
        assert_eq!(format_value(24.44), "24.4");
        assert_eq!(format_value(0.0), "0.0");
    }

    #[test]
    fn legend_lists_visible_series_only() {
        let mut spec = fixtures::spec(ChartKind::Bar);
        spec.series[1].hidden = true;
        let text: String = legend_line(&spec)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("Lakers"));
        assert!(!text.contains("Warriors"));
    }

    #[test]
    fn every_kind_renders_including_empty() {
        for kind in [
            ChartKind::Bar,
            ChartKind::StackedBar,
            ChartKind::Radar,
            ChartKind::Line,
            ChartKind::Doughnut,
        ] {
            let backend = TestBackend::new(80, 24);
            let mut terminal = Terminal::new(backend).unwrap();
            let spec = fixtures::spec(kind);
            terminal
                .draw(|frame| render_chart(frame, frame.area(), &spec))
                .unwrap();
            let empty = fixtures::empty(kind);
            terminal
                .draw(|frame| render_chart(frame, frame.area(), &empty))
                .unwrap();
        }
    }
}
