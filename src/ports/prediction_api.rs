//! Prediction API port: Trait for the remote stroke prediction service.
//!
//! This trait abstracts the HTTP backend from the application logic.

use crate::domain::{AccuracyReading, HealthStatus, ModelKind, PredictionRequest, PredictionResult};

/// Text shown to the user for any failed prediction request.
pub const CONNECTION_FAILURE_NOTICE: &str = "Failed to connect backend";

/// Failures talking to the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, broken pipe, ...
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response. `message` comes from the backend's error body, if any.
    #[error("Backend returned HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// Body was not JSON or lacked the expected fields.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Every failure reads the same to the user; details go to the log.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        CONNECTION_FAILURE_NOTICE
    }
}

/// Trait for prediction service calls.
///
/// Implementations issue exactly one request per call: no retry, no caching.
pub trait PredictionApi: Send + Sync {
    /// Submit one prediction request to the endpoint of `model`.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    fn predict(
        &self,
        model: ModelKind,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ApiError>;

    /// Fetch the reported accuracy of `model`.
    ///
    /// # Errors
    /// Same taxonomy as [`PredictionApi::predict`].
    fn accuracy(&self, model: ModelKind) -> Result<AccuracyReading, ApiError>;

    /// Check backend liveness.
    ///
    /// # Errors
    /// Same taxonomy as [`PredictionApi::predict`].
    fn health(&self) -> Result<HealthStatus, ApiError>;
}
