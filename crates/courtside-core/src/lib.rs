// Library root: stat comparison model, chart derivation, and projection
// augmentation. Renderer-agnostic; the terminal front end lives in
// `courtside-tui`.

pub mod chart;
pub mod compare;
pub mod config;
pub mod entity;
pub mod error;
pub mod fetch;
pub mod metric;
pub mod payload;
pub mod projection;
pub mod season;
