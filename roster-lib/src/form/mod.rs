//! Form sessions
//!
//! A [`Form`] owns the record a user is editing, re-validates it on every
//! change, and gates submission behind validity and an explicit in-flight
//! flag so a pending submission cannot be doubled.

mod login;
mod register;

pub use login::login_rules;
pub use register::registration_rules;

use crate::error::AuthError;
use crate::error::ValidationErrors;
use crate::model::Record;
use crate::model::Value;
use crate::validate::RuleSet;
use crate::validate::validate;

/// A single form session: record, rules, and current error state.
///
/// # Example
///
/// ```
/// use roster_lib::form::{Form, login_rules};
///
/// let mut form = Form::new(login_rules());
/// form.set("email", "user@example.com");
/// form.set("password", "Abc12345");
/// assert!(form.is_valid());
/// assert!(form.try_begin_submit());
/// ```
#[derive(Debug, Clone)]
pub struct Form {
    rules: RuleSet,
    record: Record,
    errors: ValidationErrors,
    form_error: Option<String>,
    in_flight: bool,
}

impl Form {
    /// Creates an empty form with the given rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_record(rules, Record::new())
    }

    /// Creates a form pre-filled with an existing record (edit forms).
    pub fn with_record(rules: RuleSet, record: Record) -> Self {
        let errors = validate(&record, &rules);
        Self {
            rules,
            record,
            errors,
            form_error: None,
            in_flight: false,
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Applies a field edit and re-runs validation.
    ///
    /// Any form-level error from a previous submission is cleared: the user
    /// is changing the input the error complained about.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.record.insert(field, value);
        self.form_error = None;
        self.revalidate();
    }

    /// Re-runs validation against the current record.
    ///
    /// Returns `true` when the record is fully valid. The error mapping is
    /// regenerated wholesale, never merged with previous results.
    pub fn revalidate(&mut self) -> bool {
        self.errors = validate(&self.record, &self.rules);
        self.errors.is_empty()
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Returns the record being edited.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Returns the current per-field error mapping.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the error for a single field, if it failed.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Returns the form-level error banner, if any.
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Returns `true` when every field passes its checks.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` while a submission is pending.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    // =========================================================================
    // Submission gate
    // =========================================================================

    /// Attempts to start a submission.
    ///
    /// Refuses while the record is invalid, a form-level error is showing,
    /// or another submission is already in flight. On success the in-flight
    /// flag is set; the caller must report the outcome through
    /// [`finish_submit`](Form::finish_submit).
    pub fn try_begin_submit(&mut self) -> bool {
        if self.in_flight || self.form_error.is_some() || !self.revalidate() {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Ends the in-flight submission, recording a remote error if one came
    /// back.
    ///
    /// A remote error replaces the current error state: field-mappable
    /// errors land beside their input, everything else becomes the
    /// form-level banner. The form stays interactive either way.
    pub fn finish_submit(&mut self, outcome: Result<(), &AuthError>) {
        self.in_flight = false;
        if let Err(err) = outcome {
            match err.field_error() {
                Some(field_err) => self.errors.replace(field_err.field, field_err.message),
                None => self.form_error = Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_login_form() -> Form {
        let mut form = Form::new(login_rules());
        form.set("email", "user@example.com");
        form.set("password", "Abc12345");
        form
    }

    #[test]
    fn edits_revalidate() {
        let mut form = Form::new(login_rules());
        assert!(!form.is_valid());
        assert_eq!(form.error("email"), Some("Email isRequired"));

        form.set("email", "user@example.com");
        form.set("password", "Abc12345");
        assert!(form.is_valid());

        form.set("password", "short");
        assert_eq!(
            form.error("password"),
            Some("password must be at least 8 characters long")
        );
    }

    #[test]
    fn invalid_form_cannot_submit() {
        let mut form = Form::new(login_rules());
        assert!(!form.try_begin_submit());
        assert!(!form.is_submitting());
    }

    #[test]
    fn pending_submission_blocks_another() {
        let mut form = valid_login_form();
        assert!(form.try_begin_submit());
        assert!(form.is_submitting());
        assert!(!form.try_begin_submit());

        form.finish_submit(Ok(()));
        assert!(!form.is_submitting());
        assert!(form.try_begin_submit());
    }

    #[test]
    fn remote_field_error_lands_on_its_input() {
        let mut form = valid_login_form();
        assert!(form.try_begin_submit());
        form.finish_submit(Err(&AuthError::EmailExists));

        assert_eq!(form.error("email"), Some("User with this Email already exists"));
        assert!(form.form_error().is_none());
        assert!(!form.is_submitting());
    }

    #[test]
    fn remote_banner_error_blocks_until_edit() {
        let mut form = valid_login_form();
        assert!(form.try_begin_submit());
        form.finish_submit(Err(&AuthError::InvalidPassword));

        assert_eq!(form.form_error(), Some("Wrong password"));
        // Banner showing: submission stays blocked until the user edits.
        assert!(!form.try_begin_submit());

        form.set("password", "Abc12346");
        assert!(form.form_error().is_none());
        assert!(form.try_begin_submit());
    }

    #[test]
    fn prefilled_record_validates_immediately() {
        let record = Record::new().set("email", "a@b").set("password", "Abc12345");
        let form = Form::with_record(login_rules(), record);
        assert_eq!(form.error("email"), Some("Email entered incorrectly"));
    }
}
