//! Error types

mod api;
mod auth;
mod field;
mod validation;

pub use api::*;
pub use auth::*;
pub use field::*;
pub use validation::*;

/// Top-level error type for Roster client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from an API call to the profile backend.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error from the identity provider or session handling.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Error accessing a typed record field.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// JSON serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested operation is not valid in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
