//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the Flask prediction backend

pub mod http;

pub use http::{HttpPredictionApi, DEFAULT_BASE_URL};
