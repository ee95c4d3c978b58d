// Status bar widget: app name, season, screen tabs, last status message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::Screen;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [name] [season] | [tab bar] | [status message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        " Courtside ",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];

    if !state.season.is_empty() {
        spans.push(Span::styled(
            format!("{} ", state.season),
            Style::default().fg(Color::Gray),
        ));
    }
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.screen));

    if let Some(msg) = &state.status_message {
        spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Build tab indicator spans with the active screen highlighted.
/// E.g. "[1:Players] [2:Teams] [3:Projections]"
pub fn tab_spans(active: Screen) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for screen in Screen::ALL {
        let style = if screen == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", screen.hotkey(), screen.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(Screen::Teams);
        // 0=[1:Players], 1=" ", 2=[2:Teams]
        assert!(spans[2].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn tab_spans_contain_labels() {
        let spans = tab_spans(Screen::Players);
        let labels: Vec<&str> = spans.iter().step_by(2).map(|s| s.content.as_ref()).collect();
        assert_eq!(labels, vec!["[1:Players]", "[2:Teams]", "[3:Projections]"]);
    }

    #[test]
    fn render_shows_season_and_message() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState {
            season: "2025-26".into(),
            status_message: Some("Exported to exports/players.json".into()),
            ..ViewState::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("2025-26"));
        assert!(text.contains("Exported to"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
