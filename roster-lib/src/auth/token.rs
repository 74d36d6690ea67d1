//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// An identity-provider access token with optional expiration and refresh token.
///
/// This struct represents the result of a successful sign-in, sign-up, or
/// token refresh. It carries the bearer token used for API calls, the local
/// user id the token was issued for, and refresh metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub id_token: String,
    /// The identity provider's local user id.
    pub user_id: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token for obtaining new access tokens without re-authentication.
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Creates a new access token with just the token string and user id.
    pub fn new(id_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id_token: id_token.into(),
            user_id: user_id.into(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Creates a new access token with expiration and refresh token.
    pub fn with_refresh(
        id_token: impl Into<String>,
        user_id: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            id_token: id_token.into(),
            user_id: user_id.into(),
            expires_at,
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token will expire within the given duration.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// Returns `true` if a refresh token is available.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.id_token)
    }
}

/// Trait for providing access tokens to the Roster client.
///
/// The client calls `get_token` before each API request. Implementations
/// should return cached tokens when valid and handle refresh transparently;
/// [`SessionTokens`](super::SessionTokens) is the session-backed
/// implementation.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets a currently valid access token.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;
}

/// A simple token provider that always returns the same static token.
///
/// Useful for testing or when you have a long-lived token that doesn't
/// need refresh logic.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given token and user id.
    pub fn new(id_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(id_token, user_id),
        }
    }

    /// Creates a new static token provider from an existing AccessToken.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_checks() {
        let mut token = AccessToken::new("tok", "u1");
        assert!(!token.is_expired());
        assert!(!token.expires_within(chrono::Duration::hours(1)));

        token.expires_at = Some(Utc::now() - chrono::Duration::seconds(1));
        assert!(token.is_expired());

        token.expires_at = Some(Utc::now() + chrono::Duration::minutes(2));
        assert!(!token.is_expired());
        assert!(token.expires_within(chrono::Duration::minutes(5)));
    }

    #[test]
    fn bearer_header() {
        let token = AccessToken::new("abc", "u1");
        assert_eq!(token.as_bearer(), "Bearer abc");
    }
}
