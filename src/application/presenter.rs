//! Result presenter: Maps submit state to what the result panel shows.

use crate::domain::{PredictionResult, RiskClass};

/// Shown before the first prediction of a page.
pub const PLACEHOLDER_TEXT: &str = "Result will appear after prediction.";

/// Badge text when the backend did not name its model.
pub const UNKNOWN_MODEL: &str = "Unknown";

/// What the result panel displays.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView<'a> {
    /// A request is in flight
    Busy,
    /// Nothing submitted yet (or the last submit failed)
    Placeholder,
    /// Decoded classification
    Classified {
        class: RiskClass,
        model: &'a str,
        raw: String,
        received_at: chrono::DateTime<chrono::Utc>,
    },
}

/// Pure rendering decision from `(result, loading)`.
#[must_use]
pub fn present(result: Option<&PredictionResult>, loading: bool) -> ResultView<'_> {
    if loading {
        return ResultView::Busy;
    }
    match result {
        None => ResultView::Placeholder,
        Some(result) => ResultView::Classified {
            class: result.risk_class(),
            model: result.model.as_deref().unwrap_or(UNKNOWN_MODEL),
            raw: result.raw_pretty(),
            received_at: result.received_at,
        },
    }
}

/// Label of the submit control.
#[must_use]
pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Predicting..."
    } else {
        "Predict"
    }
}
