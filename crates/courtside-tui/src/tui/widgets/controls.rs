// Controls row: chart kind selector on comparison screens, group/stat/mode
// selectors on the projection screen.

use courtside_core::chart::ChartSelector;
use courtside_core::compare::ComparisonView;
use courtside_core::projection::ProjectionView;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::PanelState;
use crate::protocol::Screen;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = match state.screen {
        Screen::Players | Screen::Teams => match state.comparison() {
            Some(PanelState::Ready(view)) => Line::from(selector_spans(view)),
            _ => Line::default(),
        },
        Screen::Projections => match &state.projections {
            PanelState::Ready(view) => Line::from(projection_spans(view)),
            PanelState::Loading => Line::from(Span::styled(
                " Fetching model projections...",
                Style::default().fg(Color::Yellow),
            )),
            PanelState::Failed(_) => Line::default(),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn selector_key(selector: ChartSelector) -> char {
    match selector {
        ChartSelector::Bar => 'b',
        ChartSelector::Radar => 'r',
        ChartSelector::Line => 'l',
        ChartSelector::Doughnut => 'd',
    }
}

/// "[b]ar [r]adar ..." with the selected kind highlighted and kinds that
/// have no mounted chart dimmed.
pub fn selector_spans(view: &ComparisonView) -> Vec<Span<'static>> {
    let available = view.available_selectors();
    let mut spans = vec![Span::styled(" Chart: ", Style::default().fg(Color::Gray))];
    for selector in ChartSelector::ALL {
        let style = if selector == view.selected() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if available.contains(&selector) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("[{}]{}", selector_key(selector), &selector.as_str()[1..]),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

/// "Team: LAL  Stat: PTS  Mode: both".
pub fn projection_spans(view: &ProjectionView) -> Vec<Span<'static>> {
    let controls = view.controls();
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::styled(" Team: ", label),
        Span::styled(view.group_label(), value),
        Span::styled("  Stat: ", label),
        Span::styled(controls.stat.as_str(), value),
        Span::styled("  Mode: ", label),
        Span::styled(controls.mode.as_str(), value),
    ]
}
