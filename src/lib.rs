//! Data core for a personal weight and steps tracking calendar.
//!
//! Per-day records (morning weight, evening weight, step count) live in a
//! SQLite store behind [`db::Database`]; [`controller::AppController`] owns
//! the current selection and turns stored entries into chart-ready series
//! via [`charts`]. Rendering and input widgets are the caller's concern.

pub mod calendar;
pub mod charts;
pub mod controller;
pub mod db;
pub mod settings;

pub use charts::{AxisRange, ChartPoint, Granularity, Metric};
pub use controller::{AppController, AppTab, ChartModel, ViewState};
pub use db::{
    models::{DayEntry, EntryField},
    Database,
};
pub use settings::SettingsStore;

/// Initializes logging from the `RUST_LOG` environment variable, defaulting
/// to `Info`.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
