//! Declarative field validation
//!
//! Forms collect edits into a [`Record`] and re-run [`validate`] against a
//! static [`RuleSet`] on every change; submission is only attempted once the
//! resulting [`ValidationErrors`] mapping is empty.

mod check;
mod rules;

pub use check::*;
pub use rules::*;

pub use crate::error::ValidationErrors;

use crate::model::Record;

/// Validates a record against a rule set.
///
/// For each field declared in the rule set, evaluates its checks in
/// declaration order against the record's value for that field, stopping at
/// the first failure. Fields whose checks all pass contribute no entry, so
/// the record is fully valid iff the returned mapping is empty.
///
/// Pure function of its inputs: no mutation, no I/O, deterministic.
///
/// # Example
///
/// ```
/// use roster_lib::model::Record;
/// use roster_lib::validate::{validate, Check, RuleSet};
///
/// let rules = RuleSet::new().field("email", [
///     Check::required("Email isRequired"),
///     Check::email("Email entered incorrectly"),
/// ]);
///
/// let record = Record::new().set("email", "");
/// let errors = validate(&record, &rules);
/// assert_eq!(errors.get("email"), Some("Email isRequired"));
/// ```
pub fn validate(record: &Record, rules: &RuleSet) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (field, checks) in rules.iter() {
        let value = record.get(field);
        for check in checks {
            if !check.evaluate(value) {
                errors.insert_first(field, check.message());
                break;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::login_rules;
    use crate::model::OptionRef;

    fn login_record(email: &str, password: &str) -> Record {
        Record::new().set("email", email).set("password", password)
    }

    #[test]
    fn empty_email_reports_required() {
        let errors = validate(&login_record("", "Abc12345"), &login_rules());
        assert_eq!(errors.get("email"), Some("Email isRequired"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn short_password_reports_min_length() {
        let errors = validate(&login_record("a@b.com", "short"), &login_rules());
        assert_eq!(
            errors.get("password"),
            Some("password must be at least 8 characters long")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn malformed_domain_reports_email_shape() {
        let errors = validate(&login_record("a@b", "Abc12345"), &login_rules());
        assert_eq!(errors.get("email"), Some("Email entered incorrectly"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn valid_record_produces_empty_mapping() {
        let errors = validate(&login_record("a@b.com", "Abc12345"), &login_rules());
        assert!(errors.is_empty());
    }

    #[test]
    fn first_failing_check_wins() {
        // "" fails required, email shape, and min length; only the first
        // declared check may be reported.
        let rules = RuleSet::new().field(
            "email",
            [
                Check::required("first"),
                Check::email("second"),
                Check::min_length("third", 3),
            ],
        );
        let record = Record::new().set("email", "");
        let errors = validate(&record, &rules);
        assert_eq!(errors.get("email"), Some("first"));
    }

    #[test]
    fn missing_field_fails_required() {
        let rules = RuleSet::new().field("profession", [Check::required("choose one")]);
        let errors = validate(&Record::new(), &rules);
        assert_eq!(errors.get("profession"), Some("choose one"));
    }

    #[test]
    fn unchecked_required_checkbox_fails() {
        let rules = RuleSet::new().field("licence", [Check::required("confirm the licence")]);
        let record = Record::new().set("licence", false);
        let errors = validate(&record, &rules);
        assert_eq!(errors.get("licence"), Some("confirm the licence"));
    }

    #[test]
    fn empty_multi_select_fails_required() {
        let rules = RuleSet::new().field("qualities", [Check::required("pick a quality")]);
        let record = Record::new().set("qualities", Vec::<OptionRef>::new());
        let errors = validate(&record, &rules);
        assert_eq!(errors.get("qualities"), Some("pick a quality"));

        let record = record.set("qualities", vec![OptionRef::new("q1", "Patience")]);
        assert!(validate(&record, &rules).is_empty());
    }

    #[test]
    fn validate_is_idempotent_and_does_not_mutate() {
        let record = login_record("a@b", "short");
        let rules = login_rules();
        let before = record.clone();

        let first = validate(&record, &rules);
        let second = validate(&record, &rules);

        assert_eq!(first, second);
        assert_eq!(record, before);
    }

    #[test]
    fn fields_without_rules_are_ignored() {
        let rules = RuleSet::new().field("email", [Check::required("Email isRequired")]);
        let record = Record::new().set("email", "a@b.com").set("stay_on", true);
        assert!(validate(&record, &rules).is_empty());
    }
}
