//! Patient data input form.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::application::PredictionSession;
use crate::domain::{Field, FieldKind, FieldSpec, FieldValue, PatientForm, SelectOption};
use crate::tui::styles::ClinicTheme;

/// Cursor and typed-text buffers for the visible fields of one page.
///
/// The form itself lives in the session; every keystroke is pushed through
/// [`PredictionSession::set_field`] so derived values stay current.
pub struct PatientFormState {
    specs: Vec<FieldSpec>,
    buffers: Vec<String>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl PatientFormState {
    /// Build buffers from the form's current values. Hidden fields are skipped.
    #[must_use]
    pub fn new(form: &PatientForm) -> Self {
        let (specs, buffers) = form
            .entries()
            .filter(|(spec, _)| spec.kind != FieldKind::Hidden)
            .map(|(spec, value)| (*spec, value.to_string()))
            .unzip();
        Self {
            specs,
            buffers,
            selected_field: 0,
            error_message: None,
        }
    }

    fn position(&self, field: Field) -> Option<usize> {
        self.specs.iter().position(|spec| spec.field == field)
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        if !self.specs.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.specs.len();
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.specs.is_empty() {
            return;
        }
        if self.selected_field == 0 {
            self.selected_field = self.specs.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field.
    pub fn input_char(&mut self, c: char, session: &mut PredictionSession) {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        self.edit(session, |buf| buf.push(c));
    }

    /// Delete the last character
    pub fn delete_char(&mut self, session: &mut PredictionSession) {
        self.edit(session, |buf| {
            buf.pop();
        });
    }

    /// Clear the current field (stored as zero).
    pub fn clear_field(&mut self, session: &mut PredictionSession) {
        self.edit(session, |buf| buf.zeroize());
    }

    fn edit(&mut self, session: &mut PredictionSession, change: impl FnOnce(&mut String)) {
        let Some(spec) = self.specs.get(self.selected_field).copied() else {
            return;
        };
        if !matches!(spec.kind, FieldKind::Number { .. }) {
            return;
        }

        let mut next = self.buffers[self.selected_field].clone();
        change(&mut next);
        match session.set_field(spec.field, &next) {
            Ok(()) => {
                self.buffers[self.selected_field] = next;
                self.error_message = None;
                self.sync(session.form());
            }
            Err(e) => {
                next.zeroize();
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Step the current select field to the next (or previous) option.
    pub fn cycle_option(&mut self, forward: bool, session: &mut PredictionSession) {
        let Some(spec) = self.specs.get(self.selected_field).copied() else {
            return;
        };
        let FieldKind::Select(options) = spec.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }

        let current = session
            .form()
            .get(spec.field)
            .and_then(|value| option_index(options, value));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };

        let choice = options[next];
        match session.set_field(spec.field, choice.value) {
            Ok(()) => {
                self.buffers[self.selected_field] = choice.value.to_string();
                self.error_message = None;
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Refresh buffers of fields the form computes (BMI).
    fn sync(&mut self, form: &PatientForm) {
        for (spec, buffer) in self.specs.iter().zip(self.buffers.iter_mut()) {
            if !form.is_editable(spec.field) {
                if let Some(value) = form.get(spec.field) {
                    *buffer = value.to_string();
                }
            }
        }
    }

    /// Wipe all field buffers from memory.
    ///
    /// Called when the page unmounts so typed values do not outlive it.
    pub fn clear_sensitive(&mut self) {
        for buffer in &mut self.buffers {
            buffer.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
    }
}

fn option_index(options: &[SelectOption], value: &FieldValue) -> Option<usize> {
    options
        .iter()
        .position(|opt| FieldValue::coerce(opt.value) == *value)
}

/// Render the patient form.
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState, form: &PatientForm) {
    let label_width = state
        .specs
        .iter()
        .map(|spec| spec.field.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::with_capacity(state.specs.len() + 2);
    for (i, (spec, buffer)) in state.specs.iter().zip(state.buffers.iter()).enumerate() {
        let is_selected = i == state.selected_field;
        let editable = form.is_editable(spec.field);

        let marker = if is_selected {
            Span::styled("▸ ", ClinicTheme::focused())
        } else {
            Span::raw("  ")
        };
        let label_style = if is_selected {
            ClinicTheme::focused()
        } else {
            ClinicTheme::text_secondary()
        };
        let label = Span::styled(
            format!("{:<width$}  ", spec.field.label(), width = label_width),
            label_style,
        );

        let mut row = vec![marker, label];
        match spec.kind {
            FieldKind::Select(options) => {
                let shown = form
                    .get(spec.field)
                    .and_then(|value| option_index(options, value))
                    .map_or_else(|| buffer.clone(), |i| options[i].label.to_string());
                if is_selected {
                    row.push(Span::styled("‹ ", ClinicTheme::cursor()));
                    row.push(Span::styled(shown, ClinicTheme::text()));
                    row.push(Span::styled(" ›", ClinicTheme::cursor()));
                } else {
                    row.push(Span::styled(shown, ClinicTheme::text()));
                }
            }
            FieldKind::Number { hint } if !editable => {
                row.push(Span::styled(buffer.clone(), ClinicTheme::disabled()));
                row.push(Span::styled(format!("  ({hint})"), ClinicTheme::text_muted()));
            }
            FieldKind::Number { hint } => {
                if buffer.is_empty() {
                    row.push(Span::styled(hint, ClinicTheme::text_muted()));
                } else {
                    row.push(Span::styled(buffer.clone(), ClinicTheme::text()));
                    row.push(Span::styled(format!(" {hint}"), ClinicTheme::text_muted()));
                }
                if is_selected {
                    row.push(Span::styled("▌", ClinicTheme::cursor()));
                }
            }
            FieldKind::Hidden => {}
        }
        lines.push(Line::from(row));
    }

    if let Some(err) = &state.error_message {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("! ", ClinicTheme::alarm()),
            Span::styled(err.clone(), ClinicTheme::alarm()),
        ]));
    }

    let block = Block::default()
        .title(Span::styled(" Patient Data ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border_focused());

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PageConfig;

    fn open(page: &'static PageConfig) -> (PredictionSession, PatientFormState) {
        let session = PredictionSession::new(page);
        let state = PatientFormState::new(session.form());
        (session, state)
    }

    fn select(state: &mut PatientFormState, field: Field) {
        state.selected_field = state.position(field).unwrap();
    }

    fn buffer(state: &PatientFormState, field: Field) -> Option<&str> {
        state.position(field).map(|i| state.buffers[i].as_str())
    }

    #[test]
    fn test_hidden_fields_not_navigable() {
        let (_, mut state) = open(&PageConfig::RANDOM_FOREST);
        assert!(state.position(Field::Id).is_none());

        let visible = state.specs.len();
        for _ in 0..visible {
            assert_ne!(state.specs[state.selected_field].field, Field::Id);
            state.next_field();
        }
        assert_eq!(state.selected_field, 0);

        state.prev_field();
        assert_eq!(state.selected_field, visible - 1);
    }

    #[test]
    fn test_typing_updates_form_and_bmi() {
        let (mut session, mut state) = open(&PageConfig::XGBOOST);
        select(&mut state, Field::Weight);
        state.clear_field(&mut session);
        for c in "90".chars() {
            state.input_char(c, &mut session);
        }

        assert_eq!(session.form().get(Field::Weight), Some(&FieldValue::Number(90.0)));
        assert_eq!(session.form().get(Field::Bmi), Some(&FieldValue::Number(31.1)));
        assert_eq!(buffer(&state, Field::Bmi), Some("31.1"));
    }

    #[test]
    fn test_letters_ignored() {
        let (mut session, mut state) = open(&PageConfig::XGBOOST);
        select(&mut state, Field::Age);
        state.input_char('x', &mut session);
        assert_eq!(buffer(&state, Field::Age), Some("30"));
    }

    #[test]
    fn test_cleared_field_reads_zero() {
        let (mut session, mut state) = open(&PageConfig::XGBOOST_MANUAL);
        select(&mut state, Field::AvgGlucoseLevel);
        state.clear_field(&mut session);
        assert_eq!(buffer(&state, Field::AvgGlucoseLevel), Some(""));
        assert_eq!(
            session.form().get(Field::AvgGlucoseLevel),
            Some(&FieldValue::Number(0.0))
        );
    }

    #[test]
    fn test_derived_bmi_rejects_edits() {
        let (mut session, mut state) = open(&PageConfig::RANDOM_FOREST_VECTOR);
        select(&mut state, Field::Bmi);
        state.input_char('5', &mut session);

        assert!(state.error_message.is_some());
        assert_eq!(session.form().get(Field::Bmi), Some(&FieldValue::Number(20.8)));
    }

    #[test]
    fn test_manual_bmi_accepts_edits() {
        let (mut session, mut state) = open(&PageConfig::RANDOM_FOREST);
        select(&mut state, Field::Bmi);
        state.delete_char(&mut session);
        assert!(state.error_message.is_none());
        assert!(session.form().get(Field::Bmi).is_some());
    }

    #[test]
    fn test_cycle_option_wraps() {
        let (mut session, mut state) = open(&PageConfig::XGBOOST);
        select(&mut state, Field::Hypertension);

        state.cycle_option(true, &mut session);
        assert_eq!(session.form().get(Field::Hypertension), Some(&FieldValue::Number(1.0)));
        state.cycle_option(true, &mut session);
        assert_eq!(session.form().get(Field::Hypertension), Some(&FieldValue::Number(0.0)));
        state.cycle_option(false, &mut session);
        assert_eq!(session.form().get(Field::Hypertension), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_cycle_option_on_text_select() {
        let (mut session, mut state) = open(&PageConfig::XGBOOST);
        select(&mut state, Field::WorkType);
        state.cycle_option(true, &mut session);
        assert_eq!(
            session.form().get(Field::WorkType),
            Some(&FieldValue::text("Self-employed"))
        );
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let (_, mut state) = open(&PageConfig::XGBOOST);
        state.selected_field = 3;
        state.error_message = Some("x".into());
        state.clear_sensitive();

        assert!(state.buffers.iter().all(String::is_empty));
        assert_eq!(state.selected_field, 0);
        assert!(state.error_message.is_none());
    }
}
