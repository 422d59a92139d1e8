//! Application layer: Use cases and services.
//!
//! Orchestrates the domain types with the prediction port:
//! - `page`: parametrized page presets
//! - `session`: per-page submit state machine
//! - `service`: port calls
//! - `presenter`: result panel view model

mod page;
mod presenter;
mod service;
mod session;

pub use page::{PageConfig, PageSlug};
pub use presenter::{present, submit_label, ResultView, PLACEHOLDER_TEXT, UNKNOWN_MODEL};
pub use service::PredictionService;
pub use session::PredictionSession;
