//! Identity-provider REST flow (email/password accounts)

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::AccessToken;
use crate::error::AuthError;

const DEFAULT_ACCOUNTS_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// REST wrapper over the identity provider's email/password account API.
///
/// The provider is an opaque external service; this flow only covers the
/// four operations the session needs: sign-in, sign-up, account update, and
/// token refresh. Remote failures map to [`AuthError`] variants so forms can
/// route them to a field or a banner.
///
/// # Example
///
/// ```ignore
/// use roster_lib::auth::IdentityFlow;
///
/// let identity = IdentityFlow::new("api-key");
/// let token = identity.sign_in("user@example.com", "Abc12345").await?;
/// ```
#[derive(Clone)]
pub struct IdentityFlow {
    api_key: String,
    accounts_url: String,
    token_url: String,
    http_client: reqwest::Client,
}

impl IdentityFlow {
    /// Creates a new flow against the default provider endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Overrides the accounts endpoint base URL (emulators, self-hosted).
    pub fn with_accounts_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_url = url.into();
        self
    }

    /// Overrides the token-refresh endpoint base URL.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Signs in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        debug!(email, "identity sign-in");
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.accounts_request("accounts:signInWithPassword", &body)
            .await
    }

    /// Creates a new identity account with email and password.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        debug!(email, "identity sign-up");
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.accounts_request("accounts:signUp", &body).await
    }

    /// Updates the email and password on the account behind `id_token`.
    ///
    /// Returns a fresh token; the old one is invalidated by the provider.
    pub async fn update_account(
        &self,
        id_token: &str,
        email: &str,
        password: &str,
    ) -> Result<AccessToken, AuthError> {
        debug!(email, "identity account update");
        let body = json!({
            "idToken": id_token,
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.accounts_request("accounts:update", &body).await
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
        debug!("identity token refresh");
        let url = format!("{}/token?key={}", self.token_url, self.api_key);
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self.http_client.post(&url).form(&params).send().await?;
        handle_response(response).await
    }

    async fn accounts_request(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<AccessToken, AuthError> {
        let url = format!("{}/{}?key={}", self.accounts_url, endpoint, self.api_key);
        let response = self.http_client.post(&url).json(body).send().await?;
        handle_response(response).await
    }
}

impl std::fmt::Debug for IdentityFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityFlow")
            .field("api_key", &"[REDACTED]")
            .field("accounts_url", &self.accounts_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

async fn handle_response(response: reqwest::Response) -> Result<AccessToken, AuthError> {
    if response.status().is_success() {
        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;
        Ok(token_response.into_access_token())
    } else {
        let error_response: ErrorResponse =
            response.json().await.unwrap_or_else(|_| ErrorResponse {
                error: ErrorDetail {
                    message: "unknown".to_string(),
                },
            });
        Err(map_error_message(&error_response.error.message))
    }
}

/// Token response from the identity provider.
///
/// The accounts endpoints answer in camelCase with string-typed lifetimes;
/// the refresh endpoint answers in snake_case. Aliases cover both.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(alias = "idToken", alias = "id_token")]
    id_token: String,
    #[serde(alias = "localId", alias = "user_id")]
    user_id: String,
    #[serde(default, alias = "refreshToken", alias = "refresh_token")]
    refresh_token: Option<String>,
    #[serde(default, alias = "expiresIn", alias = "expires_in")]
    expires_in: Option<String>,
}

impl TokenResponse {
    fn into_access_token(self) -> AccessToken {
        let expires_at = self
            .expires_in
            .and_then(|secs| secs.parse::<i64>().ok())
            .map(|secs| Utc::now() + Duration::seconds(secs));

        match self.refresh_token {
            Some(refresh) => {
                AccessToken::with_refresh(self.id_token, self.user_id, expires_at, refresh)
            }
            None => AccessToken {
                id_token: self.id_token,
                user_id: self.user_id,
                expires_at,
                refresh_token: None,
            },
        }
    }
}

/// Error envelope from the identity provider.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Maps identity-provider error codes to AuthError variants.
///
/// The provider appends detail after a colon for some codes (for example
/// `TOO_MANY_ATTEMPTS_TRY_LATER : ...`), so match on the prefix.
fn map_error_message(message: &str) -> AuthError {
    let code = message.split(&[':', ' ']).next().unwrap_or(message);
    match code {
        "EMAIL_EXISTS" => AuthError::EmailExists,
        "EMAIL_NOT_FOUND" => AuthError::EmailNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => AuthError::InvalidPassword,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
            AuthError::TokenExpired {
                message: message.to_string(),
            }
        }
        _ => AuthError::Parse(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_provider_error_codes() {
        assert!(matches!(map_error_message("EMAIL_EXISTS"), AuthError::EmailExists));
        assert!(matches!(
            map_error_message("EMAIL_NOT_FOUND"),
            AuthError::EmailNotFound
        ));
        assert!(matches!(
            map_error_message("INVALID_PASSWORD"),
            AuthError::InvalidPassword
        ));
        assert!(matches!(
            map_error_message("TOO_MANY_ATTEMPTS_TRY_LATER : retry later"),
            AuthError::TooManyAttempts
        ));
        assert!(matches!(
            map_error_message("TOKEN_EXPIRED"),
            AuthError::TokenExpired { .. }
        ));
        assert!(matches!(map_error_message("WEIRD_CODE"), AuthError::Parse(_)));
    }

    #[test]
    fn parses_accounts_token_response() {
        let json = r#"{
            "idToken": "tok",
            "localId": "u1",
            "refreshToken": "ref",
            "expiresIn": "3600"
        }"#;
        let token = serde_json::from_str::<TokenResponse>(json)
            .unwrap()
            .into_access_token();
        assert_eq!(token.id_token, "tok");
        assert_eq!(token.user_id, "u1");
        assert!(token.can_refresh());
        assert!(token.expires_at.is_some());
    }

    #[test]
    fn parses_refresh_token_response() {
        let json = r#"{
            "id_token": "tok2",
            "user_id": "u1",
            "refresh_token": "ref2",
            "expires_in": "3600"
        }"#;
        let token = serde_json::from_str::<TokenResponse>(json)
            .unwrap()
            .into_access_token();
        assert_eq!(token.id_token, "tok2");
        assert_eq!(token.refresh_token.as_deref(), Some("ref2"));
    }
}
