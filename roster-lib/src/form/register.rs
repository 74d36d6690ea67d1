//! Registration form rules

use crate::validate::Check;
use crate::validate::RuleSet;

/// Rule set for the registration form.
///
/// Extends the login checks with name, profession, and licence-agreement
/// fields; the profession select and licence checkbox only need presence.
pub fn registration_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "email",
            [
                Check::required("email isRequired"),
                Check::email("Email entered incorrectly"),
            ],
        )
        .field(
            "name",
            [
                Check::required("name isRequired"),
                Check::min_length("name must be at least 3 characters long", 3),
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
        .field(
            "profession",
            [Check::required("Be sure to choose your profession")],
        )
        .field(
            "licence",
            [Check::required(
                "You cannot use our service without confirming the license agreement",
            )],
        )
}
