//! Validation error types

use std::collections::BTreeMap;

/// Error information for a specific field that failed validation.
///
/// Produced locally by the validation engine, and also used to route remote
/// errors (such as email-already-exists) onto the matching form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The result of a validation pass: field name → first failing message.
///
/// At most one message per field (first-failure-wins). A record is valid iff
/// this mapping is empty. Each pass regenerates the mapping wholesale; it is
/// never merged with prior results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Creates an empty error mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    /// Returns `true` if the given field failed.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Records a failure for a field, keeping an earlier message if present.
    pub fn insert_first(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Records a failure for a field, replacing any earlier message.
    pub fn replace(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<FieldValidationError> for ValidationErrors {
    fn from(err: FieldValidationError) -> Self {
        let mut errors = Self::new();
        errors.replace(err.field, err.message);
        errors
    }
}

impl FromIterator<FieldValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldValidationError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for err in iter {
            errors.insert_first(err.field, err.message);
        }
        errors
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}
