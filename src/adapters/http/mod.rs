//! HTTP adapter: Implementation of PredictionApi over reqwest.
//!
//! Talks JSON to the Flask prediction backend:
//! - `POST /predict`, `POST /xgboost` for classifications
//! - `GET /accuracy/{model}` for the reported model accuracy
//! - `GET /` for liveness
//!
//! The client has no request timeout and never retries.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{AccuracyReading, HealthStatus, ModelKind, PredictionRequest, PredictionResult};
use crate::ports::{ApiError, PredictionApi};

/// Backend origin used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const JSON: &str = "application/json";

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Blocking HTTP client for the prediction service.
pub struct HttpPredictionApi {
    client: Client,
    base_url: String,
}

impl HttpPredictionApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).header(ACCEPT, JSON).send()?;
        let body = read_body(response)?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Read a response, turning non-2xx statuses and non-JSON bodies into errors.
fn read_body(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text()?;

    if !status.is_success() {
        // Flask error bodies look like {"status": false, "message": "..."}.
        let message = serde_json::from_str::<Value>(&text).ok().and_then(|v| {
            v.get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        });
        warn!(status = status.as_u16(), message = ?message, "Backend returned error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

impl PredictionApi for HttpPredictionApi {
    fn predict(
        &self,
        model: ModelKind,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ApiError> {
        let url = self.url(model.predict_path());
        debug!(%url, model = %model, "POST prediction");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, JSON)
            .json(request)
            .send()?;
        let body = read_body(response)?;

        PredictionResult::from_json(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn accuracy(&self, model: ModelKind) -> Result<AccuracyReading, ApiError> {
        self.get_json(model.accuracy_path())
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/")
    }
}
