// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the three screens' views. The projection
// loader pushes a single `UiUpdate` over an mpsc channel once its fetch batch
// is joined; key presses mutate the views in place. Frames are redrawn at
// ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use courtside_core::chart::ChartSpec;
use courtside_core::compare::ComparisonView;
use courtside_core::projection::ProjectionView;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::{self, PanelState};
use crate::protocol::{Screen, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state read by `render_frame`.
pub struct ViewState {
    /// Which screen is shown in the main panel.
    pub screen: Screen,
    pub players: PanelState<ComparisonView>,
    pub teams: PanelState<ComparisonView>,
    /// `Loading` until the model fetch batch has been joined.
    pub projections: PanelState<ProjectionView>,
    /// Season label shown in the status bar, e.g. "2025-26".
    pub season: String,
    /// One-line feedback (export result, errors) shown in the status bar.
    pub status_message: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            screen: Screen::Players,
            players: PanelState::Loading,
            teams: PanelState::Loading,
            projections: PanelState::Loading,
            season: String::new(),
            status_message: None,
        }
    }
}

impl ViewState {
    pub fn new(
        players: PanelState<ComparisonView>,
        teams: PanelState<ComparisonView>,
        season: impl Into<String>,
    ) -> Self {
        ViewState {
            players,
            teams,
            season: season.into(),
            ..ViewState::default()
        }
    }

    /// Comparison view behind the current screen, if it is a comparison
    /// screen.
    pub fn comparison(&self) -> Option<&PanelState<ComparisonView>> {
        match self.screen {
            Screen::Players => Some(&self.players),
            Screen::Teams => Some(&self.teams),
            Screen::Projections => None,
        }
    }

    pub fn comparison_mut(&mut self) -> Option<&mut ComparisonView> {
        match self.screen {
            Screen::Players => self.players.ready_mut(),
            Screen::Teams => self.teams.ready_mut(),
            Screen::Projections => None,
        }
    }

    /// Charts currently drawn on screen, keyed by surface id.
    pub fn visible_charts(&self) -> Vec<(&str, &ChartSpec)> {
        match self.screen {
            Screen::Players | Screen::Teams => self
                .comparison()
                .and_then(PanelState::ready)
                .map(|view| {
                    view.visible()
                        .map(|i| (i.surface.as_str(), &i.spec))
                        .collect()
                })
                .unwrap_or_default(),
            Screen::Projections => self
                .projections
                .ready()
                .map(|view| vec![("projectionChart", view.chart())])
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::ProjectionsReady(view) => {
            state.projections = PanelState::Ready(*view);
        }
        UiUpdate::ProjectionsFailed(message) => {
            state.projections = PanelState::Failed(message);
        }
    }
}

/// Act on a command produced by the input handler. Returns `true` when the
/// loop should exit.
fn handle_command(state: &mut ViewState, cmd: UserCommand, export_dir: &Path) -> bool {
    match cmd {
        UserCommand::Quit => true,
        UserCommand::Export => {
            let charts = state.visible_charts();
            let message = match app::export_charts(export_dir, state.screen.slug(), &charts) {
                Ok(path) => format!("Exported to {}", path.display()),
                Err(e) => {
                    warn!("export failed: {:#}", e);
                    format!("Export failed: {e}")
                }
            };
            state.status_message = Some(message);
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::controls::render(frame, layout.controls, state);
    widgets::screen::render(frame, layout.main_panel, state);
    widgets::help_bar::render(frame, layout.help_bar, state.screen);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit, including when drawing fails.
pub async fn run(
    ui_rx: mpsc::Receiver<UiUpdate>,
    view_state: ViewState,
    export_dir: PathBuf,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 3-4. Loop, then restore whatever the loop returned.
    let result = restore_after(
        event_loop(&mut terminal, ui_rx, view_state, &export_dir),
        ratatui::restore,
    )
    .await;
    info!("TUI exited");
    result
}

/// Await `body`, then call `restore` before handing back its result.
async fn restore_after<F>(body: F, restore: impl FnOnce()) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    let result = body.await;
    restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    mut view_state: ViewState,
    export_dir: &Path,
) -> anyhow::Result<()> {
    let mut event_stream = EventStream::new();
    let mut updates_open = true;

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv(), if updates_open => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Loader finished; keep running on local data.
                    None => updates_open = false,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            if handle_command(&mut view_state, cmd, export_dir) {
                                return Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("terminal input error: {}", e);
                        return Ok(());
                    }
                    None => return Ok(()),
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
