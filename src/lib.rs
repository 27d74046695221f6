//! fitrecap - Personal workout log
//!
//! Weekly progress levels for the live view, and a yearly recap
//! (totals, streaks, heatmap, timeline) for the recap and export views.

pub mod analytics;
pub mod db;
pub mod exercises;
pub mod tui;

pub use analytics::Analytics;
pub use db::{Database, WorkoutLog};
