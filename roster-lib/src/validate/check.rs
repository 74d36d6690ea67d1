//! Validation checks

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Value;

/// `local@domain` shape: at least one `@`, a dotted domain, no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex is valid"));

/// A single named validation predicate with its failure message.
///
/// The supported check kinds are enumerated statically, so a rule set cannot
/// reference a check the engine does not implement.
///
/// # Example
///
/// ```
/// use roster_lib::validate::Check;
///
/// let check = Check::min_length("password must be at least 8 characters long", 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Fails on missing values, blank strings, unchecked booleans, and empty
    /// multi-select lists.
    Required { message: String },
    /// Fails when the value is not shaped like `local@domain`.
    Email { message: String },
    /// Fails when the string is shorter than `min` characters.
    MinLength { message: String, min: usize },
    /// Fails when the string contains no uppercase letter.
    HasCapital { message: String },
    /// Fails when the string contains no decimal digit.
    HasDigit { message: String },
}

impl Check {
    /// Creates a required check.
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// Creates an email-shape check.
    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    /// Creates a minimum-length check.
    pub fn min_length(message: impl Into<String>, min: usize) -> Self {
        Self::MinLength {
            message: message.into(),
            min,
        }
    }

    /// Creates a contains-uppercase check.
    pub fn has_capital(message: impl Into<String>) -> Self {
        Self::HasCapital {
            message: message.into(),
        }
    }

    /// Creates a contains-digit check.
    pub fn has_digit(message: impl Into<String>) -> Self {
        Self::HasDigit {
            message: message.into(),
        }
    }

    /// Returns the failure message for this check.
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::Email { message }
            | Self::MinLength { message, .. }
            | Self::HasCapital { message }
            | Self::HasDigit { message } => message,
        }
    }

    /// Evaluates this check against a field value.
    ///
    /// `None` means the field is absent from the record. Returns `true` when
    /// the check passes.
    ///
    /// Shape checks (everything except `Required`) read missing and `Null`
    /// values as the empty string, and fail outright on non-string values:
    /// a checkbox cannot look like an email.
    pub fn evaluate(&self, value: Option<&Value>) -> bool {
        match self {
            Self::Required { .. } => match value {
                None | Some(Value::Null) => false,
                Some(Value::Bool(checked)) => *checked,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Options(opts)) => !opts.is_empty(),
                Some(_) => true,
            },
            Self::Email { .. } => match string_or_empty(value) {
                Some(s) => EMAIL_RE.is_match(s),
                None => false,
            },
            Self::MinLength { min, .. } => match string_or_empty(value) {
                Some(s) => s.chars().count() >= *min,
                None => false,
            },
            Self::HasCapital { .. } => match string_or_empty(value) {
                Some(s) => s.chars().any(|c| c.is_uppercase()),
                None => false,
            },
            Self::HasDigit { .. } => match string_or_empty(value) {
                Some(s) => s.chars().any(|c| c.is_ascii_digit()),
                None => false,
            },
        }
    }
}

/// Resolves a value for the shape checks: missing and `Null` read as empty,
/// strings read as themselves, anything else has no string shape.
fn string_or_empty(value: Option<&Value>) -> Option<&str> {
    match value {
        None | Some(Value::Null) => Some(""),
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_semantics() {
        let check = Check::required("required");
        assert!(!check.evaluate(None));
        assert!(!check.evaluate(Some(&Value::Null)));
        assert!(!check.evaluate(Some(&Value::Bool(false))));
        assert!(check.evaluate(Some(&Value::Bool(true))));
        assert!(!check.evaluate(Some(&Value::String("   ".into()))));
        assert!(check.evaluate(Some(&Value::String("x".into()))));
        assert!(!check.evaluate(Some(&Value::Options(vec![]))));
    }

    #[test]
    fn email_shapes() {
        let check = Check::email("bad email");
        assert!(check.evaluate(Some(&Value::String("a@b.com".into()))));
        assert!(!check.evaluate(Some(&Value::String("a@b".into()))));
        assert!(!check.evaluate(Some(&Value::String("a b@c.com".into()))));
        assert!(!check.evaluate(Some(&Value::String("no-at-sign.com".into()))));
        assert!(!check.evaluate(None));
        assert!(!check.evaluate(Some(&Value::Bool(true))));
    }

    #[test]
    fn min_length_counts_chars() {
        let check = Check::min_length("too short", 8);
        assert!(check.evaluate(Some(&Value::String("Abc12345".into()))));
        assert!(!check.evaluate(Some(&Value::String("short".into()))));
        assert!(!check.evaluate(None));
    }

    #[test]
    fn capital_and_digit() {
        let capital = Check::has_capital("no capital");
        let digit = Check::has_digit("no digit");
        assert!(capital.evaluate(Some(&Value::String("aBc".into()))));
        assert!(!capital.evaluate(Some(&Value::String("abc".into()))));
        assert!(digit.evaluate(Some(&Value::String("abc1".into()))));
        assert!(!digit.evaluate(Some(&Value::String("abc".into()))));
    }
}
