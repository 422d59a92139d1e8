//! Prediction service responses.
//!
//! Represents the decoded output of the remote stroke classifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote model a page talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    RandomForest,
    Xgboost,
}

impl ModelKind {
    /// Tag sent as `method` in feature-vector payloads.
    #[must_use]
    pub fn method_tag(self) -> &'static str {
        match self {
            Self::RandomForest => "random_forest",
            Self::Xgboost => "xgboost",
        }
    }

    /// Path of the prediction endpoint.
    #[must_use]
    pub fn predict_path(self) -> &'static str {
        match self {
            Self::RandomForest => "/predict",
            Self::Xgboost => "/xgboost",
        }
    }

    /// Path of the model accuracy endpoint.
    #[must_use]
    pub fn accuracy_path(self) -> &'static str {
        match self {
            Self::RandomForest => "/accuracy/random-forest",
            Self::Xgboost => "/accuracy/xgboost",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomForest => write!(f, "Random Forest"),
            Self::Xgboost => write!(f, "XGBoost"),
        }
    }
}

/// Binary stroke risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    /// Classifier output 0 (or anything other than 1)
    LowRisk,
    /// Classifier output 1
    StrokeRisk,
}

impl RiskClass {
    /// Only a numeric `1` (`1` or `1.0`) means elevated risk. Strings,
    /// `null` and every other number are low risk.
    #[must_use]
    pub fn from_code(code: &Value) -> Self {
        if code.as_f64() == Some(1.0) {
            Self::StrokeRisk
        } else {
            Self::LowRisk
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LowRisk => "Low Risk",
            Self::StrokeRisk => "Stroke Risk",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::LowRisk => "No elevated stroke indicators from the model",
            Self::StrokeRisk => "Model flags elevated stroke risk - clinical follow-up advised",
        }
    }

    #[must_use]
    pub fn is_alarming(self) -> bool {
        self == Self::StrokeRisk
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const CLASS_KEY: &str = "hasil_prediksi";

/// Decoded prediction response.
#[derive(Debug, Clone)]
pub struct PredictionResult {
    /// Class code (`hasil_prediksi`) exactly as sent: 1 = stroke risk
    pub prediction: Value,

    /// Model name reported by the backend, if any
    pub model: Option<String>,

    /// Entire decoded response body
    pub raw: Value,

    /// When the response was decoded
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl PredictionResult {
    /// Decode a response body.
    ///
    /// # Errors
    /// Fails when `hasil_prediksi` is missing. Any present value decodes.
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        let prediction = raw
            .get(CLASS_KEY)
            .cloned()
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field(CLASS_KEY))?;
        let model = raw.get("model").and_then(Value::as_str).map(str::to_owned);
        Ok(Self {
            prediction,
            model,
            raw,
            received_at: chrono::Utc::now(),
        })
    }

    #[must_use]
    pub fn risk_class(&self) -> RiskClass {
        RiskClass::from_code(&self.prediction)
    }

    /// Response body as indented JSON.
    #[must_use]
    pub fn raw_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

/// Reported model accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReading {
    /// Backend success flag
    pub status: bool,

    /// Fraction in [0, 1]; absent when the backend reports failure
    #[serde(default)]
    pub accuracy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AccuracyReading {
    /// Badge text, e.g. `Accuracy 94.00%`. `None` unless the backend reported success.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        if !self.status {
            return None;
        }
        self.accuracy
            .map(|fraction| format!("Accuracy {:.2}%", fraction * 100.0))
    }
}

/// Backend liveness check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
