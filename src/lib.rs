//! # Strokecast
//!
//! Terminal client for a remote stroke-risk prediction service.
//!
//! This crate provides:
//! - Patient form state with content-based numeric coercion and derived BMI
//! - Request serialization for the named-field and feature-vector endpoints
//! - A blocking HTTP client for prediction, accuracy and health calls
//! - Terminal UI with non-blocking submits
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientForm, PredictionRequest, PredictionResult)
//! - `ports`: Trait definitions for the prediction service
//! - `adapters`: Concrete implementations (reqwest)
//! - `application`: Page presets, submit state machine, presenter
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{PageConfig, PredictionService, PredictionSession};
pub use domain::{PatientForm, PredictionRequest, PredictionResult, RiskClass};

/// Result type for Strokecast operations
pub type Result<T> = std::result::Result<T, StrokecastError>;

/// Main error type for Strokecast
#[derive(Debug, thiserror::Error)]
pub enum StrokecastError {
    #[error("Invalid form input: {0}")]
    Form(#[from] domain::FormError),

    #[error("Prediction service error: {0}")]
    Api(#[from] ports::ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
