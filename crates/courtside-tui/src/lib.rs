// Terminal dashboard for courtside: screens, input handling and chart
// widgets on top of `courtside-core`.

pub mod app;
pub mod protocol;
pub mod tui;
