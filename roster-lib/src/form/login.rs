//! Login form rules

use crate::validate::Check;
use crate::validate::RuleSet;

/// Rule set for the login form: email and password.
///
/// Length is checked before the character-class checks so a too-short
/// password reports its length first.
pub fn login_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "email",
            [
                Check::required("Email isRequired"),
                Check::email("Email entered incorrectly"),
            ],
        )
        .field(
            "password",
            [
                Check::required("password isRequired"),
                Check::min_length("password must be at least 8 characters long", 8),
                Check::has_capital("password must contain at least one uppercase letter"),
                Check::has_digit("password must contain at least one number"),
            ],
        )
}
