//! Patient form state for stroke risk prediction.
//!
//! Attribute names follow the healthcare-dataset-stroke-data vocabulary the
//! remote models were trained on (`Residence_type` keeps its capital R).

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// One patient attribute collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    Gender,
    Age,
    Hypertension,
    HeartDisease,
    EverMarried,
    WorkType,
    ResidenceType,
    AvgGlucoseLevel,
    Weight,
    Height,
    Bmi,
    SmokingStatus,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::Gender,
        Field::Age,
        Field::Hypertension,
        Field::HeartDisease,
        Field::EverMarried,
        Field::WorkType,
        Field::ResidenceType,
        Field::AvgGlucoseLevel,
        Field::Weight,
        Field::Height,
        Field::Bmi,
        Field::SmokingStatus,
    ];

    /// Name used on the wire and in `--set name=value` arguments.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Hypertension => "hypertension",
            Self::HeartDisease => "heart_disease",
            Self::EverMarried => "ever_married",
            Self::WorkType => "work_type",
            Self::ResidenceType => "Residence_type",
            Self::AvgGlucoseLevel => "avg_glucose_level",
            Self::Weight => "weight",
            Self::Height => "height",
            Self::Bmi => "bmi",
            Self::SmokingStatus => "smoking_status",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Record ID",
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart Disease",
            Self::EverMarried => "Ever Married",
            Self::WorkType => "Work Type",
            Self::ResidenceType => "Residence Type",
            Self::AvgGlucoseLevel => "Avg Glucose Level",
            Self::Weight => "Weight (kg)",
            Self::Height => "Height (cm)",
            Self::Bmi => "BMI",
            Self::SmokingStatus => "Smoking Status",
        }
    }

    /// Whether the backend expects a number for this field.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Age
                | Self::Hypertension
                | Self::HeartDisease
                | Self::AvgGlucoseLevel
                | Self::Weight
                | Self::Height
                | Self::Bmi
        )
    }

    /// Value a freshly opened page starts with.
    #[must_use]
    pub fn default_value(self) -> FieldValue {
        match self {
            Self::Id => FieldValue::text("9999"),
            Self::Gender => FieldValue::text("Male"),
            Self::Age => FieldValue::Number(30.0),
            Self::Hypertension | Self::HeartDisease => FieldValue::Number(0.0),
            Self::EverMarried => FieldValue::text("No"),
            Self::WorkType => FieldValue::text("Private"),
            Self::ResidenceType => FieldValue::text("Urban"),
            Self::AvgGlucoseLevel => FieldValue::Number(100.0),
            Self::Weight => FieldValue::Number(60.0),
            Self::Height => FieldValue::Number(170.0),
            Self::Bmi => FieldValue::Number(20.8),
            Self::SmokingStatus => FieldValue::text("never smoked"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormError::UnrecognizedName(wanted.to_string()))
    }
}

/// A stored form value: a number when the input looked numeric, text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Coerce raw input by content, not by field type.
    ///
    /// Blank input becomes `0`, finite numeric literals become numbers and
    /// everything else is kept as trimmed text.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Number(0.0);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    /// Explicit numeric cast. `None` when the value cannot be read as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => match Self::coerce(s) {
                Self::Number(n) => Some(n),
                Self::Text(_) => None,
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Integral values go out as JSON integers (`30`, not `30.0`).
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// A choice offered for a categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub label: &'static str,
    /// Raw value, coerced like typed input when selected.
    pub value: &'static str,
}

const fn opt(label: &'static str, value: &'static str) -> SelectOption {
    SelectOption { label, value }
}

pub const GENDER_OPTIONS: &[SelectOption] = &[
    opt("Male", "Male"),
    opt("Female", "Female"),
    opt("Other", "Other"),
];
pub const GENDER_ENCODED_OPTIONS: &[SelectOption] = &[opt("Male", "Male"), opt("Female", "Female")];
pub const YES_NO_FLAG_OPTIONS: &[SelectOption] = &[opt("No", "0"), opt("Yes", "1")];
pub const MARRIED_OPTIONS: &[SelectOption] = &[opt("No", "No"), opt("Yes", "Yes")];
pub const WORK_TYPE_OPTIONS: &[SelectOption] = &[
    opt("Children", "children"),
    opt("Government", "Govt_job"),
    opt("Never Worked", "Never_worked"),
    opt("Private", "Private"),
    opt("Self-employed", "Self-employed"),
];
pub const WORK_TYPE_ENCODED_OPTIONS: &[SelectOption] = &[
    opt("Private", "Private"),
    opt("Self-employed", "Self-employed"),
    opt("Government", "Govt_job"),
];
pub const RESIDENCE_OPTIONS: &[SelectOption] = &[opt("Urban", "Urban"), opt("Rural", "Rural")];
pub const SMOKING_OPTIONS: &[SelectOption] = &[
    opt("Never smoked", "never smoked"),
    opt("Formerly smoked", "formerly smoked"),
    opt("Smokes", "smokes"),
    opt("Unknown", "Unknown"),
];
pub const SMOKING_ENCODED_OPTIONS: &[SelectOption] = &[
    opt("Never smoked", "never smoked"),
    opt("Formerly smoked", "formerly smoked"),
    opt("Smokes", "smokes"),
];

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Chosen from a fixed option set.
    Select(&'static [SelectOption]),
    /// Typed number, with a unit hint.
    Number { hint: &'static str },
    /// Carried in the form and payload but never shown.
    Hidden,
}

/// A field as it appears on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field: Field,
    pub kind: FieldKind,
}

/// Errors from form edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is not part of this form")]
    UnknownField(Field),

    #[error("{0} is derived from weight and height")]
    ReadOnly(Field),

    #[error("Unrecognized field name: {0}")]
    UnrecognizedName(String),
}

/// Body-mass index from weight (kg) and height (cm), rounded to one decimal.
///
/// Rounding works on the exact binary value of the quotient, so `16.149999…`
/// becomes `16.1`. Exact midpoints (`x.25`, `x.75`) round up.
///
/// Returns `None` unless both inputs are strictly positive.
#[must_use]
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg > 0.0 && height_cm > 0.0) {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return None;
    }
    round_one_decimal(bmi)
}

fn round_one_decimal(x: f64) -> Option<f64> {
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        // Exact tie; `x * 10` is exact here.
        return Some((x * 10.0 + 0.5).floor() / 10.0);
    }
    // `{:.1}` rounds the exact decimal expansion of `x`.
    format!("{x:.1}").parse().ok()
}

/// Field name to value mapping for one page instance.
#[derive(Debug, Clone)]
pub struct PatientForm {
    schema: &'static [FieldSpec],
    values: Vec<FieldValue>,
}

impl PatientForm {
    /// Create a form with every schema field at its default.
    #[must_use]
    pub fn new(schema: &'static [FieldSpec]) -> Self {
        let values = schema.iter().map(|spec| spec.field.default_value()).collect();
        let mut form = Self { schema, values };
        form.derive_bmi();
        form
    }

    #[must_use]
    pub fn schema(&self) -> &'static [FieldSpec] {
        self.schema
    }

    fn index_of(&self, field: Field) -> Option<usize> {
        self.schema.iter().position(|spec| spec.field == field)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.index_of(field).is_some()
    }

    /// BMI is computed (and locked) when the page collects weight and height.
    #[must_use]
    pub fn derives_bmi(&self) -> bool {
        self.contains(Field::Weight) && self.contains(Field::Height) && self.contains(Field::Bmi)
    }

    /// Whether the user may edit this field directly.
    #[must_use]
    pub fn is_editable(&self, field: Field) -> bool {
        self.contains(field) && !(field == Field::Bmi && self.derives_bmi())
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.index_of(field).map(|i| &self.values[i])
    }

    /// Numeric view of a field (explicit cast).
    #[must_use]
    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    /// Store raw input for `field`, coercing numeric-looking text to a number.
    ///
    /// Editing weight or height recomputes BMI.
    ///
    /// # Errors
    /// `UnknownField` if the page does not collect `field`, `ReadOnly` for a
    /// derived BMI.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        let idx = self.index_of(field).ok_or(FormError::UnknownField(field))?;
        if field == Field::Bmi && self.derives_bmi() {
            return Err(FormError::ReadOnly(field));
        }

        let value = FieldValue::coerce(raw);
        let changed = self.values[idx] != value;
        self.values[idx] = value;

        if changed && matches!(field, Field::Weight | Field::Height) {
            self.derive_bmi();
        }
        Ok(())
    }

    fn derive_bmi(&mut self) {
        if !self.derives_bmi() {
            return;
        }
        let (Some(weight), Some(height)) = (self.number(Field::Weight), self.number(Field::Height))
        else {
            return;
        };
        if let (Some(bmi), Some(idx)) = (body_mass_index(weight, height), self.index_of(Field::Bmi)) {
            tracing::trace!(bmi, "Recomputed BMI");
            self.values[idx] = FieldValue::Number(bmi);
        }
    }

    /// Fields with their current values, in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&FieldSpec, &FieldValue)> {
        self.schema.iter().zip(self.values.iter())
    }
}
