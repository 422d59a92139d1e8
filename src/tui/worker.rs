//! Background API worker for non-blocking prediction calls.
//!
//! Each mounted screen owns one `ApiWorker`. Calls run on their own
//! threads and report back over the worker's channel; the TUI main loop
//! drains it with `try_recv`. Dropping the worker on unmount drops the
//! receiver, so results that arrive afterwards are discarded.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::application::PredictionService;
use crate::domain::{AccuracyReading, HealthStatus, ModelKind, PredictionRequest, PredictionResult};
use crate::ports::{ApiError, PredictionApi};

/// Completed API call.
#[derive(Debug)]
pub enum ApiEvent {
    /// A submit finished
    Prediction(Result<PredictionResult, ApiError>),
    /// The accuracy fetch finished
    Accuracy(Result<AccuracyReading, ApiError>),
    /// The liveness check finished
    Health(Result<HealthStatus, ApiError>),
}

/// Channel endpoint for one mounted screen.
pub struct ApiWorker {
    tx: Sender<ApiEvent>,
    rx: Receiver<ApiEvent>,
}

impl Default for ApiWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiWorker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Try to receive the next completed call (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.rx.try_recv().ok()
    }

    /// Send a prediction request in the background.
    pub fn spawn_prediction<A>(
        &self,
        service: Arc<PredictionService<A>>,
        model: ModelKind,
        request: PredictionRequest,
    ) where
        A: PredictionApi + 'static,
    {
        self.spawn(move || ApiEvent::Prediction(service.predict(model, &request)));
    }

    /// Fetch model accuracy in the background.
    pub fn spawn_accuracy<A>(&self, service: Arc<PredictionService<A>>, model: ModelKind)
    where
        A: PredictionApi + 'static,
    {
        self.spawn(move || ApiEvent::Accuracy(service.accuracy(model)));
    }

    /// Check backend liveness in the background.
    pub fn spawn_health<A>(&self, service: Arc<PredictionService<A>>)
    where
        A: PredictionApi + 'static,
    {
        self.spawn(move || ApiEvent::Health(service.health()));
    }

    fn spawn<F>(&self, call: F)
    where
        F: FnOnce() -> ApiEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = call();
            if tx.send(event).is_err() {
                tracing::debug!("Screen unmounted before response arrived; discarding");
            }
        });
    }
}
