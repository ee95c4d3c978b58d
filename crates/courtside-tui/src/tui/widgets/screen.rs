// Main panel: the visible charts of the active screen, or the reason there
// are none.

use courtside_core::compare::ComparisonView;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

use super::{render_chart, render_message};
use crate::app::PanelState;
use crate::protocol::Screen;
use crate::tui::layout::chart_cells;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    match state.screen {
        Screen::Players => render_comparison(frame, area, &state.players, "Player Comparison"),
        Screen::Teams => render_comparison(frame, area, &state.teams, "Team Comparison"),
        Screen::Projections => match &state.projections {
            PanelState::Ready(view) => render_chart(frame, area, view.chart()),
            PanelState::Loading => render_message(
                frame,
                area,
                "Projections",
                "Waiting for model projections...",
                Color::Yellow,
            ),
            PanelState::Failed(msg) => render_message(frame, area, "Projections", msg, Color::Red),
        },
    }
}

fn render_comparison(
    frame: &mut Frame,
    area: Rect,
    panel: &PanelState<ComparisonView>,
    title: &str,
) {
    let view = match panel {
        PanelState::Ready(view) => view,
        PanelState::Loading => {
            render_message(frame, area, title, "Loading...", Color::Yellow);
            return;
        }
        PanelState::Failed(msg) => {
            render_message(frame, area, title, msg, Color::Red);
            return;
        }
    };

    let visible: Vec<_> = view.visible().collect();
    if visible.is_empty() {
        let msg = format!("No {} chart is mounted on this screen", view.selected());
        render_message(frame, area, title, &msg, Color::DarkGray);
        return;
    }
    for (instance, cell) in visible.iter().zip(chart_cells(area, visible.len())) {
        render_chart(frame, cell, &instance.spec);
    }
}
