// Messages exchanged between the background loader and the TUI.

use courtside_core::projection::ProjectionView;

/// Dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Players,
    Teams,
    Projections,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Players, Screen::Teams, Screen::Projections];

    /// Title shown in the status bar tab strip.
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Players => "Players",
            Screen::Teams => "Teams",
            Screen::Projections => "Projections",
        }
    }

    /// Lower-case name used in export file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Screen::Players => "players",
            Screen::Teams => "teams",
            Screen::Projections => "projections",
        }
    }

    /// Digit key that switches to this screen.
    pub fn hotkey(&self) -> char {
        match self {
            Screen::Players => '1',
            Screen::Teams => '2',
            Screen::Projections => '3',
        }
    }
}

/// Updates pushed to the TUI from background tasks.
#[derive(Debug)]
pub enum UiUpdate {
    /// Every model fetch has settled and the projection chart is built.
    ProjectionsReady(Box<ProjectionView>),
    /// The projection screen cannot be shown; carries the diagnostic.
    ProjectionsFailed(String),
}

/// Commands produced by key presses that the TUI loop acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Write the charts visible on the current screen as Chart.js JSON.
    Export,
    Quit,
}
