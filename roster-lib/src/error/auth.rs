//! Authentication error types

use super::FieldValidationError;

/// Errors that can occur during identity-provider flows and session handling.
///
/// Remote errors are recoverable: forms surface them either beside a single
/// input (see [`field_error`](AuthError::field_error)) or as a form-level
/// banner, and stay interactive for a retry.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// An account already exists for the given email.
    #[error("User with this Email already exists")]
    EmailExists,

    /// No account exists for the given email.
    #[error("User with this Email was not found")]
    EmailNotFound,

    /// The password does not match the account.
    #[error("Wrong password")]
    InvalidPassword,

    /// The identity provider throttled repeated sign-in attempts.
    #[error("Too many sign-in attempts, try again later")]
    TooManyAttempts,

    /// The token (or refresh token) is no longer valid.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },

    /// An operation requiring a session was attempted without one.
    #[error("Not signed in")]
    NotSignedIn,

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse an identity-provider response.
    #[error("Auth response parse error: {0}")]
    Parse(String),

    /// Failed to persist or read the session token.
    #[error("Token store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Maps this error onto a form field, when it concerns one.
    ///
    /// `EmailExists` belongs beside the email input; every other variant is
    /// a form-level message.
    pub fn field_error(&self) -> Option<FieldValidationError> {
        match self {
            Self::EmailExists => Some(FieldValidationError::new("email", self.to_string())),
            _ => None,
        }
    }
}
