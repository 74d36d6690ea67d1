//! Dynamic form record

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::OptionRef;
use super::Value;
use crate::error::FieldError;

/// A dynamic record of form-field values.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing a form
/// to collect whatever fields it renders. Typed getter methods provide safe
/// access with proper error handling; the validation engine reads fields
/// through [`get`](Record::get).
///
/// # Example
///
/// ```
/// use roster_lib::model::Record;
///
/// let record = Record::new()
///     .set("email", "user@example.com")
///     .set("stay_on", true);
///
/// assert_eq!(record.get_string("email").unwrap(), Some("user@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a multi-select options field value.
    pub fn get_options(&self, field: &str) -> Result<Option<&[OptionRef]>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Options(o)) => Ok(Some(o.as_slice())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "options",
                other.type_name(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters() {
        let record = Record::new()
            .set("email", "a@b.com")
            .set("licence", true)
            .set("rate", 4i64)
            .set("qualities", vec![OptionRef::new("q1", "Patience")]);

        assert_eq!(record.get_string("email").unwrap(), Some("a@b.com"));
        assert_eq!(record.get_bool("licence").unwrap(), Some(true));
        assert_eq!(record.get_int("rate").unwrap(), Some(4));
        assert_eq!(record.get_options("qualities").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn missing_field_errors() {
        let record = Record::new();
        assert!(matches!(
            record.get_string("email"),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn type_mismatch_errors() {
        let record = Record::new().set("email", true);
        assert!(matches!(
            record.get_string("email"),
            Err(FieldError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn null_reads_as_none() {
        let record = Record::new().set("email", Value::Null);
        assert_eq!(record.get_string("email").unwrap(), None);
    }

    #[test]
    fn serde_round_trip() {
        let record = Record::new()
            .set("email", "a@b.com")
            .set("licence", false)
            .set("qualities", vec![OptionRef::new("q1", "Patience")]);

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
