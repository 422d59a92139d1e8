//! Domain layer: Core types for stroke risk prediction.
//!
//! Pure Rust types with no I/O. Wire shapes are expressed through serde.

mod patient;
mod payload;
mod prediction;

pub use patient::{
    body_mass_index, Field, FieldKind, FieldSpec, FieldValue, FormError, PatientForm,
    SelectOption, GENDER_ENCODED_OPTIONS, GENDER_OPTIONS, MARRIED_OPTIONS, RESIDENCE_OPTIONS,
    SMOKING_ENCODED_OPTIONS, SMOKING_OPTIONS, WORK_TYPE_ENCODED_OPTIONS, WORK_TYPE_OPTIONS,
    YES_NO_FLAG_OPTIONS,
};
pub use payload::{DirectPayload, PayloadKind, PredictionRequest, FEATURE_VECTOR_SCHEMA};
pub use prediction::{AccuracyReading, HealthStatus, ModelKind, PredictionResult, RiskClass};
