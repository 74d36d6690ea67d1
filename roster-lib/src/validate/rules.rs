//! Declarative per-form rule sets

use super::Check;

/// A per-form mapping from field name to an ordered list of checks.
///
/// Rule sets are static configuration: built once per form, then passed by
/// reference to [`validate`](super::validate) on every change. Check order
/// within a field is evaluation order (first failure wins).
///
/// # Example
///
/// ```
/// use roster_lib::validate::{Check, RuleSet};
///
/// let rules = RuleSet::new()
///     .field("email", [
///         Check::required("Email isRequired"),
///         Check::email("Email entered incorrectly"),
///     ]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    fields: Vec<(String, Vec<Check>)>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds checks for a field (builder pattern).
    ///
    /// Calling this twice for the same field appends to its check list.
    pub fn field(
        mut self,
        name: impl Into<String>,
        checks: impl IntoIterator<Item = Check>,
    ) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => existing.extend(checks),
            None => self.fields.push((name, checks.into_iter().collect())),
        }
        self
    }

    /// Returns the checks declared for a field.
    pub fn checks(&self, field: &str) -> Option<&[Check]> {
        self.fields
            .iter()
            .find(|(n, _)| n == field)
            .map(|(_, checks)| checks.as_slice())
    }

    /// Returns `true` if no fields have checks.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, checks)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Check])> {
        self.fields
            .iter()
            .map(|(name, checks)| (name.as_str(), checks.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_declaration_order() {
        let rules = RuleSet::new()
            .field("b", [Check::required("b required")])
            .field("a", [Check::required("a required")]);

        let names: Vec<&str> = rules.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn repeated_field_appends() {
        let rules = RuleSet::new()
            .field("email", [Check::required("required")])
            .field("email", [Check::email("bad shape")]);

        assert_eq!(rules.checks("email").unwrap().len(), 2);
    }
}
