//! Ports layer: Trait definitions for external operations.
//!
//! The only external system is the remote prediction service.

mod prediction_api;

pub use prediction_api::{ApiError, PredictionApi, CONNECTION_FAILURE_NOTICE};

#[cfg(test)]
pub(crate) use prediction_api::fake;
