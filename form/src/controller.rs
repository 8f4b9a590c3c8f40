use std::{collections::HashSet, future::Future};

use chrono::{NaiveDate, Utc};
use types::MatchRecord;

use crate::{
    field::{Field, FormValues},
    schema::{self, FieldError, ValidatedForm},
};

/// How a pooled field is filled in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryMode {
    /// Pick one of the previously recorded values.
    Choose,
    /// Type a new value.
    Manual,
}

/// Owns the state of one match result form: raw values, field errors and
/// the per-field manual entry overrides.
#[derive(Debug, Default)]
pub struct FormController {
    values: FormValues,
    errors: Vec<FieldError>,
    manual: HashSet<Field>,
    submitting: bool,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.errors.retain(|e| e.field != field);
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Manual whenever there is nothing to choose from, otherwise whatever the
    /// user last toggled to.
    pub fn entry_mode(&self, field: Field, pool: &[String]) -> EntryMode {
        if !field.is_pooled() || pool.is_empty() || self.manual.contains(&field) {
            EntryMode::Manual
        } else {
            EntryMode::Choose
        }
    }

    /// Switches a pooled field to free-text entry. Returns false for fields
    /// that have no choices.
    pub fn enter_manually(&mut self, field: Field) -> bool {
        if !field.is_pooled() {
            return false;
        }
        self.manual.insert(field);
        true
    }

    pub fn use_choices(&mut self, field: Field) {
        self.manual.remove(&field);
    }

    /// False while a submission is in flight. A submission whose future was
    /// dropped before its handler resolved leaves the form disabled, with its
    /// values intact, until [`FormController::reset`].
    pub fn is_submit_enabled(&self) -> bool {
        !self.submitting
    }

    /// Runs the schema, keeping the resulting field errors on the form.
    pub fn validate(&mut self) -> Result<ValidatedForm, Vec<FieldError>> {
        let result = schema::validate(&self.values);
        self.errors = match &result {
            Ok(_) => Vec::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    /// Validates, then hands the normalized record dated today (UTC) to
    /// `handler`. See [`FormController::submit_on`].
    pub async fn submit<F, Fut, T>(&mut self, handler: F) -> Result<T, Vec<FieldError>>
    where
        F: FnOnce(MatchRecord) -> Fut,
        Fut: Future<Output = T>,
    {
        self.submit_on(Utc::now().date_naive(), handler).await
    }

    /// Validates, then hands the normalized record to `handler`.
    ///
    /// Invalid input never reaches the handler and leaves the values in place.
    /// Once the handler has resolved the form is reset, whatever the handler
    /// returned. The controller stays mutably borrowed until then, so a second
    /// submission cannot start while one is in flight.
    pub async fn submit_on<F, Fut, T>(
        &mut self,
        date: NaiveDate,
        handler: F,
    ) -> Result<T, Vec<FieldError>>
    where
        F: FnOnce(MatchRecord) -> Fut,
        Fut: Future<Output = T>,
    {
        let form = self.validate()?;
        let record = form.into_record(date);
        log::debug!("Form data before submission: {record:?}");

        self.submitting = true;
        let outcome = handler(record).await;
        self.reset();
        Ok(outcome)
    }

    /// Back to defaults: empty text, a 0-0 score, no optionals, and every
    /// pooled field in choice mode.
    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.errors.clear();
        self.manual.clear();
        self.submitting = false;
    }
}
