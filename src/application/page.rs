//! Page configuration: one parametrized prediction page.
//!
//! Each preset fixes the remote model, the payload shape and the field
//! schema. Everything else (state, submit flow, rendering) is shared.

use std::fmt;
use std::str::FromStr;

use crate::domain::{
    Field, FieldKind, FieldSpec, ModelKind, PayloadKind, GENDER_ENCODED_OPTIONS, GENDER_OPTIONS,
    MARRIED_OPTIONS, RESIDENCE_OPTIONS, SMOKING_ENCODED_OPTIONS, SMOKING_OPTIONS,
    WORK_TYPE_ENCODED_OPTIONS, WORK_TYPE_OPTIONS, YES_NO_FLAG_OPTIONS,
};
use crate::StrokecastError;

const fn select(field: Field, options: &'static [crate::domain::SelectOption]) -> FieldSpec {
    FieldSpec {
        field,
        kind: FieldKind::Select(options),
    }
}

const fn number(field: Field, hint: &'static str) -> FieldSpec {
    FieldSpec {
        field,
        kind: FieldKind::Number { hint },
    }
}

/// Flat-payload page: full dataset vocabulary, BMI typed by hand.
const DIRECT_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Id,
        kind: FieldKind::Hidden,
    },
    select(Field::Gender, GENDER_OPTIONS),
    select(Field::Hypertension, YES_NO_FLAG_OPTIONS),
    select(Field::HeartDisease, YES_NO_FLAG_OPTIONS),
    select(Field::EverMarried, MARRIED_OPTIONS),
    select(Field::WorkType, WORK_TYPE_OPTIONS),
    select(Field::ResidenceType, RESIDENCE_OPTIONS),
    select(Field::SmokingStatus, SMOKING_OPTIONS),
    number(Field::Age, "years"),
    number(Field::AvgGlucoseLevel, "mg/dL"),
    number(Field::Bmi, "kg/m²"),
];

/// Feature-vector page with BMI computed from weight and height.
const DERIVED_BMI_SCHEMA: &[FieldSpec] = &[
    select(Field::Gender, GENDER_ENCODED_OPTIONS),
    select(Field::Hypertension, YES_NO_FLAG_OPTIONS),
    select(Field::HeartDisease, YES_NO_FLAG_OPTIONS),
    select(Field::EverMarried, MARRIED_OPTIONS),
    select(Field::WorkType, WORK_TYPE_ENCODED_OPTIONS),
    select(Field::ResidenceType, RESIDENCE_OPTIONS),
    select(Field::SmokingStatus, SMOKING_ENCODED_OPTIONS),
    number(Field::Age, "years"),
    number(Field::AvgGlucoseLevel, "mg/dL"),
    number(Field::Weight, "kg"),
    number(Field::Height, "cm"),
    number(Field::Bmi, "auto"),
];

/// Feature-vector page with BMI typed by hand.
const MANUAL_BMI_SCHEMA: &[FieldSpec] = &[
    select(Field::Gender, GENDER_ENCODED_OPTIONS),
    select(Field::Hypertension, YES_NO_FLAG_OPTIONS),
    select(Field::HeartDisease, YES_NO_FLAG_OPTIONS),
    select(Field::EverMarried, MARRIED_OPTIONS),
    select(Field::WorkType, WORK_TYPE_ENCODED_OPTIONS),
    select(Field::ResidenceType, RESIDENCE_OPTIONS),
    select(Field::SmokingStatus, SMOKING_ENCODED_OPTIONS),
    number(Field::Age, "years"),
    number(Field::AvgGlucoseLevel, "mg/dL"),
    number(Field::Bmi, "kg/m²"),
];

/// A prediction page variant.
#[derive(Debug, PartialEq)]
pub struct PageConfig {
    /// Identifier for `STROKECAST_PAGE` and `--page`
    pub slug: &'static str,
    pub title: &'static str,
    pub model: ModelKind,
    pub payload: PayloadKind,
    pub schema: &'static [FieldSpec],
}

impl PageConfig {
    pub const RANDOM_FOREST: PageConfig = PageConfig {
        slug: "random-forest",
        title: "Random Forest",
        model: ModelKind::RandomForest,
        payload: PayloadKind::Direct,
        schema: DIRECT_SCHEMA,
    };

    pub const RANDOM_FOREST_VECTOR: PageConfig = PageConfig {
        slug: "random-forest-vector",
        title: "Random Forest (feature vector)",
        model: ModelKind::RandomForest,
        payload: PayloadKind::FeatureVector,
        schema: DERIVED_BMI_SCHEMA,
    };

    pub const XGBOOST: PageConfig = PageConfig {
        slug: "xgboost",
        title: "XGBoost",
        model: ModelKind::Xgboost,
        payload: PayloadKind::FeatureVector,
        schema: DERIVED_BMI_SCHEMA,
    };

    pub const XGBOOST_MANUAL: PageConfig = PageConfig {
        slug: "xgboost-manual",
        title: "XGBoost (manual BMI)",
        model: ModelKind::Xgboost,
        payload: PayloadKind::FeatureVector,
        schema: MANUAL_BMI_SCHEMA,
    };

    /// All presets, in dashboard order.
    pub const ALL: [&'static PageConfig; 4] = [
        &Self::RANDOM_FOREST,
        &Self::RANDOM_FOREST_VECTOR,
        &Self::XGBOOST,
        &Self::XGBOOST_MANUAL,
    ];

    /// Look up a preset by slug.
    ///
    /// # Errors
    /// Returns `StrokecastError::Config` naming the valid slugs.
    pub fn from_slug(slug: &str) -> Result<&'static PageConfig, StrokecastError> {
        let wanted = slug.trim();
        Self::ALL
            .into_iter()
            .find(|page| page.slug.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|page| page.slug).collect();
                StrokecastError::Config(format!(
                    "unknown page '{wanted}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }

    /// Short description of the request shape, for the dashboard.
    #[must_use]
    pub fn payload_summary(&self) -> String {
        match self.payload {
            PayloadKind::Direct => format!("POST {} named fields", self.model.predict_path()),
            PayloadKind::FeatureVector => format!(
                "POST {} fitur[10] method={}",
                self.model.predict_path(),
                self.model.method_tag()
            ),
        }
    }
}

impl fmt::Display for PageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title)
    }
}

/// Newtype so `clap` can parse `--page <slug>`.
#[derive(Debug, Clone, Copy)]
pub struct PageSlug(pub &'static PageConfig);

impl FromStr for PageSlug {
    type Err = StrokecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageConfig::from_slug(s).map(PageSlug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientForm, FEATURE_VECTOR_SCHEMA};

    #[test]
    fn test_from_slug() {
        assert_eq!(
            PageConfig::from_slug("xgboost").unwrap().model,
            ModelKind::Xgboost
        );
        assert_eq!(
            PageConfig::from_slug(" Random-Forest ").unwrap().payload,
            PayloadKind::Direct
        );
        let err = PageConfig::from_slug("svm").unwrap_err();
        assert!(err.to_string().contains("random-forest-vector"));
    }

    #[test]
    fn test_every_page_collects_feature_vector_fields() {
        for page in PageConfig::ALL {
            for field in FEATURE_VECTOR_SCHEMA {
                assert!(
                    page.schema.iter().any(|spec| spec.field == field),
                    "{} lacks {field}",
                    page.slug
                );
            }
        }
    }

    #[test]
    fn test_bmi_policy_per_page() {
        assert!(!PatientForm::new(PageConfig::RANDOM_FOREST.schema).derives_bmi());
        assert!(PatientForm::new(PageConfig::RANDOM_FOREST_VECTOR.schema).derives_bmi());
        assert!(PatientForm::new(PageConfig::XGBOOST.schema).derives_bmi());
        assert!(!PatientForm::new(PageConfig::XGBOOST_MANUAL.schema).derives_bmi());
    }

    #[test]
    fn test_encoded_pages_offer_only_encodable_options() {
        let work = PageConfig::XGBOOST
            .schema
            .iter()
            .find(|spec| spec.field == Field::WorkType)
            .unwrap();
        let FieldKind::Select(options) = work.kind else {
            panic!("work type should be a select");
        };
        assert!(options.iter().all(|o| o.value != "children"));
    }

    #[test]
    fn test_unique_slugs() {
        let mut slugs: Vec<&str> = PageConfig::ALL.iter().map(|p| p.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), PageConfig::ALL.len());
    }
}
