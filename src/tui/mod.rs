//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Dashboard with page picker and backend status
//! - Prediction pages with form, submit control and result panel

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::ClinicTheme;
pub use worker::{ApiEvent, ApiWorker};
