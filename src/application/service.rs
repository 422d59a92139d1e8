//! Prediction service: Drives the prediction API for a session.
//!
//! Each method performs exactly one port call. The TUI calls these from
//! background threads; the one-shot binary calls `submit` directly.

use std::sync::Arc;

use crate::domain::{AccuracyReading, HealthStatus, ModelKind, PredictionRequest, PredictionResult};
use crate::ports::{ApiError, PredictionApi};

use super::session::PredictionSession;

/// Service wrapping a [`PredictionApi`] implementation.
pub struct PredictionService<A>
where
    A: PredictionApi,
{
    api: Arc<A>,
}

impl<A> PredictionService<A>
where
    A: PredictionApi,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Send one prediction request.
    ///
    /// # Errors
    /// Propagates the port's `ApiError`.
    pub fn predict(
        &self,
        model: ModelKind,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ApiError> {
        tracing::info!(model = %model, "Submitting prediction request");
        if let Ok(body) = request.to_json() {
            tracing::debug!(%body, "Request body");
        }
        self.api.predict(model, request)
    }

    /// Fetch the reported accuracy of `model`.
    ///
    /// # Errors
    /// Propagates the port's `ApiError`.
    pub fn accuracy(&self, model: ModelKind) -> Result<AccuracyReading, ApiError> {
        tracing::debug!(model = %model, "Fetching model accuracy");
        self.api.accuracy(model)
    }

    /// Check backend liveness.
    ///
    /// # Errors
    /// Propagates the port's `ApiError`.
    pub fn health(&self) -> Result<HealthStatus, ApiError> {
        self.api.health()
    }

    /// Run a whole submit synchronously: begin, send, finish.
    pub fn submit(&self, session: &mut PredictionSession) {
        let request = session.begin_submit();
        let outcome = self.predict(session.page().model, &request);
        session.finish_submit(outcome);
    }

    /// Load the accuracy reading of the session's model.
    pub fn load_accuracy(&self, session: &mut PredictionSession) {
        let outcome = self.accuracy(session.page().model);
        session.apply_accuracy(outcome);
    }
}
