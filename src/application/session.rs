//! Prediction session: State of one mounted prediction page.
//!
//! Submit flow is `idle -> loading -> {success, failure}`:
//! - `begin_submit` sets loading, clears any stale result and builds the request
//! - `finish_submit` stores the result or raises the failure notice, then
//!   always clears loading
//!
//! Completions are applied in arrival order, so when two submits race the
//! last response to arrive wins.

use crate::domain::{
    AccuracyReading, Field, FormError, PatientForm, PredictionRequest, PredictionResult,
};
use crate::ports::ApiError;

use super::page::PageConfig;
use super::presenter::{present, ResultView};

/// Owned state of a single page instance.
#[derive(Debug)]
pub struct PredictionSession {
    page: &'static PageConfig,
    form: PatientForm,
    loading: bool,
    result: Option<PredictionResult>,
    notice: Option<String>,
    accuracy: Option<AccuracyReading>,
}

impl PredictionSession {
    /// Open a page with default form values.
    #[must_use]
    pub fn new(page: &'static PageConfig) -> Self {
        Self {
            page,
            form: PatientForm::new(page.schema),
            loading: false,
            result: None,
            notice: None,
            accuracy: None,
        }
    }

    #[must_use]
    pub fn page(&self) -> &'static PageConfig {
        self.page
    }

    #[must_use]
    pub fn form(&self) -> &PatientForm {
        &self.form
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Pending failure notice, shown until dismissed.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn accuracy(&self) -> Option<&AccuracyReading> {
        self.accuracy.as_ref()
    }

    /// Edit one field.
    ///
    /// # Errors
    /// See [`PatientForm::set`].
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        self.form.set(field, raw)
    }

    /// Whether a submit may start now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Enter the loading state and build the request body.
    pub fn begin_submit(&mut self) -> PredictionRequest {
        self.loading = true;
        self.result = None;
        self.notice = None;
        PredictionRequest::serialize(&self.form, self.page.payload, self.page.model)
    }

    /// Apply the outcome of a submit.
    pub fn finish_submit(&mut self, outcome: Result<PredictionResult, ApiError>) {
        match outcome {
            Ok(result) => {
                tracing::info!(
                    model = %self.page.model,
                    prediction = %result.prediction,
                    class = %result.risk_class(),
                    "Prediction received"
                );
                self.result = Some(result);
            }
            Err(e) => {
                tracing::error!(model = %self.page.model, error = %e, "Prediction request failed");
                self.result = None;
                self.notice = Some(e.user_message().to_string());
            }
        }
        self.loading = false;
    }

    /// Apply the one-time accuracy fetch. Failures are logged, never shown.
    pub fn apply_accuracy(&mut self, outcome: Result<AccuracyReading, ApiError>) {
        match outcome {
            Ok(reading) => {
                tracing::debug!(model = %self.page.model, accuracy = ?reading.accuracy, "Accuracy loaded");
                self.accuracy = Some(reading);
            }
            Err(e) => {
                tracing::error!(model = %self.page.model, error = %e, "Failed to load accuracy");
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Current result panel view.
    #[must_use]
    pub fn view(&self) -> ResultView<'_> {
        present(self.result.as_ref(), self.loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskClass;
    use serde_json::json;

    fn result(code: i64) -> PredictionResult {
        PredictionResult::from_json(json!({ "hasil_prediksi": code })).unwrap()
    }

    #[test]
    fn test_begin_submit_enters_loading_and_clears_result() {
        let mut session = PredictionSession::new(&PageConfig::XGBOOST);
        session.begin_submit();
        session.finish_submit(Ok(result(0)));
        assert!(session.result().is_some());

        let request = session.begin_submit();
        assert!(session.is_loading());
        assert!(!session.can_submit());
        assert!(session.result().is_none());
        assert_eq!(session.view(), ResultView::Busy);
        assert!(matches!(request, PredictionRequest::FeatureVector { .. }));
    }

    #[test]
    fn test_success_shows_stroke_risk() {
        let mut session = PredictionSession::new(&PageConfig::RANDOM_FOREST_VECTOR);
        session.begin_submit();
        assert!(session.is_loading());

        session.finish_submit(Ok(result(1)));
        assert!(!session.is_loading());
        assert!(session.notice().is_none());
        match session.view() {
            ResultView::Classified { class, .. } => assert_eq!(class, RiskClass::StrokeRisk),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_failure_raises_notice_and_keeps_result_empty() {
        let mut session = PredictionSession::new(&PageConfig::XGBOOST);
        session.begin_submit();
        session.finish_submit(Err(ApiError::Transport("connection refused".into())));

        assert!(!session.is_loading());
        assert!(session.result().is_none());
        assert_eq!(session.notice(), Some("Failed to connect backend"));
        assert_eq!(session.view(), ResultView::Placeholder);

        session.dismiss_notice();
        assert!(session.notice().is_none());
        assert!(session.can_submit());
    }

    #[test]
    fn test_last_completion_wins() {
        let mut session = PredictionSession::new(&PageConfig::XGBOOST);
        session.begin_submit();
        session.begin_submit();

        session.finish_submit(Ok(result(1)));
        session.finish_submit(Ok(result(0)));
        assert_eq!(session.result().map(PredictionResult::risk_class), Some(RiskClass::LowRisk));
    }

    #[test]
    fn test_accuracy_failure_is_silent() {
        let mut session = PredictionSession::new(&PageConfig::XGBOOST);
        session.apply_accuracy(Err(ApiError::Transport("refused".into())));
        assert!(session.accuracy().is_none());
        assert!(session.notice().is_none());

        session.apply_accuracy(Ok(AccuracyReading {
            status: true,
            accuracy: Some(0.94),
            model: None,
        }));
        assert_eq!(
            session.accuracy().and_then(AccuracyReading::label).as_deref(),
            Some("Accuracy 94.00%")
        );
    }

    #[test]
    fn test_edits_reach_the_request() {
        let mut session = PredictionSession::new(&PageConfig::XGBOOST);
        session.set_field(Field::Weight, "90").unwrap();
        let PredictionRequest::FeatureVector { fitur, .. } = session.begin_submit() else {
            panic!("xgboost uses feature vectors");
        };
        assert_eq!(fitur[8], Some(crate::domain::FieldValue::Number(31.1)));
    }
}
