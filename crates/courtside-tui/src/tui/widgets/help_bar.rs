// Help bar: key hints for the active screen.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::Screen;

pub fn hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Players | Screen::Teams => {
            " b/r/l/d:Chart | Tab:Next chart | 1-3:Screens | g:Projections | e:Export | q:Quit"
        }
        Screen::Projections => {
            " t/T:Team | s:Stat | m:Mode | 1-3:Screens | e:Export | q:Quit"
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, screen: Screen) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint(screen),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
