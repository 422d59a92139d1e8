//! Request bodies for the prediction endpoints.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::patient::{Field, FieldValue, PatientForm};
use super::prediction::ModelKind;

/// Positional schema of the `fitur` array. Reordering breaks the backend encoder.
pub const FEATURE_VECTOR_SCHEMA: [Field; 10] = [
    Field::Gender,
    Field::Age,
    Field::Hypertension,
    Field::HeartDisease,
    Field::EverMarried,
    Field::WorkType,
    Field::ResidenceType,
    Field::AvgGlucoseLevel,
    Field::Bmi,
    Field::SmokingStatus,
];

/// Named fields of the flat payload, in emission order.
const DIRECT_FIELDS: [Field; 11] = [
    Field::Id,
    Field::Gender,
    Field::Age,
    Field::Hypertension,
    Field::HeartDisease,
    Field::EverMarried,
    Field::WorkType,
    Field::ResidenceType,
    Field::AvgGlucoseLevel,
    Field::Bmi,
    Field::SmokingStatus,
];

/// Request shape an endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Flat object keyed by field name
    Direct,
    /// `{ method, fitur: [...] }` positional encoding
    FeatureVector,
}

/// Flat payload: field name to value, `null` where a numeric cast failed.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectPayload {
    entries: Vec<(&'static str, Option<FieldValue>)>,
}

impl DirectPayload {
    /// Value emitted under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Option<FieldValue>> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}

impl Serialize for DirectPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Body of one prediction request. Built fresh for every submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionRequest {
    Direct(DirectPayload),
    FeatureVector {
        method: ModelKind,
        fitur: Vec<Option<FieldValue>>,
    },
}

impl PredictionRequest {
    /// Map the form into the wire shape `kind` for `model`.
    ///
    /// Numeric fields are cast explicitly; a value that cannot be read as a
    /// number is sent as `null`. Other fields are sent as stored.
    #[must_use]
    pub fn serialize(form: &PatientForm, kind: PayloadKind, model: ModelKind) -> Self {
        match kind {
            PayloadKind::Direct => {
                let entries = DIRECT_FIELDS
                    .into_iter()
                    .filter(|field| form.contains(*field))
                    .map(|field| (field.wire_name(), wire_value(form, field)))
                    .collect();
                Self::Direct(DirectPayload { entries })
            }
            PayloadKind::FeatureVector => Self::FeatureVector {
                method: model,
                fitur: FEATURE_VECTOR_SCHEMA
                    .into_iter()
                    .map(|field| wire_value(form, field))
                    .collect(),
            },
        }
    }

    /// Encoded JSON body.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn wire_value(form: &PatientForm, field: Field) -> Option<FieldValue> {
    if field.is_numeric() {
        form.number(field).map(FieldValue::Number)
    } else {
        form.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PageConfig;
    use serde_json::json;

    #[test]
    fn test_feature_vector_defaults_random_forest() {
        let form = PatientForm::new(PageConfig::RANDOM_FOREST_VECTOR.schema);
        let request =
            PredictionRequest::serialize(&form, PayloadKind::FeatureVector, ModelKind::RandomForest);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "method": "random_forest",
                "fitur": ["Male", 30, 0, 0, "No", "Private", "Urban", 100, 20.8, "never smoked"]
            })
        );
    }

    #[test]
    fn test_feature_vector_order() {
        let mut form = PatientForm::new(PageConfig::XGBOOST.schema);
        form.set(Field::Gender, "Female").unwrap();
        form.set(Field::Age, "67").unwrap();
        form.set(Field::Hypertension, "1").unwrap();
        form.set(Field::EverMarried, "Yes").unwrap();
        form.set(Field::WorkType, "Self-employed").unwrap();
        form.set(Field::ResidenceType, "Rural").unwrap();
        form.set(Field::AvgGlucoseLevel, "228.69").unwrap();
        form.set(Field::SmokingStatus, "smokes").unwrap();

        let request = PredictionRequest::serialize(&form, PayloadKind::FeatureVector, ModelKind::Xgboost);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "method": "xgboost",
                "fitur": ["Female", 67, 1, 0, "Yes", "Self-employed", "Rural", 228.69, 20.8, "smokes"]
            })
        );
    }

    #[test]
    fn test_numeric_slot_cast_fails_to_null() {
        let mut form = PatientForm::new(PageConfig::XGBOOST_MANUAL.schema);
        form.set(Field::Age, "-").unwrap();
        let request = PredictionRequest::serialize(&form, PayloadKind::FeatureVector, ModelKind::Xgboost);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fitur"][1], serde_json::Value::Null);
        assert_eq!(value["fitur"].as_array().map(Vec::len), Some(10));
    }

    #[test]
    fn test_direct_shape_uses_natural_names() {
        let form = PatientForm::new(PageConfig::RANDOM_FOREST.schema);
        let request = PredictionRequest::serialize(&form, PayloadKind::Direct, ModelKind::RandomForest);

        let PredictionRequest::Direct(payload) = &request else {
            panic!("expected direct payload");
        };
        assert_eq!(
            payload.keys().collect::<Vec<_>>(),
            vec![
                "id",
                "gender",
                "age",
                "hypertension",
                "heart_disease",
                "ever_married",
                "work_type",
                "Residence_type",
                "avg_glucose_level",
                "bmi",
                "smoking_status",
            ]
        );
        assert_eq!(payload.get("bmi"), Some(&Some(FieldValue::Number(20.8))));
        assert_eq!(payload.get("id"), Some(&Some(FieldValue::text("9999"))));
        assert_eq!(payload.get("weight"), None);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "id": "9999",
                "gender": "Male",
                "age": 30,
                "hypertension": 0,
                "heart_disease": 0,
                "ever_married": "No",
                "work_type": "Private",
                "Residence_type": "Urban",
                "avg_glucose_level": 100,
                "bmi": 20.8,
                "smoking_status": "never smoked"
            })
        );
    }

    #[test]
    fn test_serialization_is_idempotent() {
        for page in PageConfig::ALL {
            let form = PatientForm::new(page.schema);
            let first = PredictionRequest::serialize(&form, page.payload, page.model)
                .to_json()
                .unwrap();
            let second = PredictionRequest::serialize(&form, page.payload, page.model)
                .to_json()
                .unwrap();
            assert_eq!(first, second, "{} serialized differently", page.slug);
        }
    }
}
