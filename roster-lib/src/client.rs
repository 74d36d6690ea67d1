//! Main RosterClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;

/// The main client for the Roster profile backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Every request carries a bearer token obtained from
/// the configured [`TokenProvider`].
///
/// # Example
///
/// ```ignore
/// use roster_lib::RosterClient;
/// use roster_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-token", "my-user-id");
/// let client = RosterClient::builder()
///     .url("https://api.roster.example")
///     .token_provider(provider)
///     .build();
///
/// let professions = client.professions().await?;
/// ```
#[derive(Clone)]
pub struct RosterClient {
    inner: Arc<RosterClientInner>,
}

struct RosterClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl RosterClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> RosterClientBuilder<Missing, Missing> {
        RosterClientBuilder::new()
    }

    /// Returns the base URL of the profile backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the token provider's current user id.
    pub(crate) async fn token_user_id(&self) -> Result<String, Error> {
        let token = self.inner.token_provider.get_token().await?;
        Ok(token.user_id)
    }

    /// Sends a body-less request and returns the raw response.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::Response, Error> {
        self.request_with(method, path, None::<&()>).await
    }

    /// Sends a request with a JSON body and returns the raw response.
    pub(crate) async fn request_with<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<reqwest::Response, Error> {
        let base = Url::parse(&self.inner.base_url)
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.clone()))?;
        let url = base
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::InvalidUrl(format!("{}/{}", self.inner.base_url, path)))?;

        let token = self.inner.token_provider.get_token().await?;

        debug!(%method, %url, "roster api request");
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .bearer_auth(&token.id_token);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(parse_error_body(status, body)))
        }
    }

    /// Sends a request and unwraps the backend's `{ "content": ... }`
    /// envelope from the response.
    pub(crate) async fn fetch<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.request_with(method, path, body).await?;
        let envelope: Envelope<T> = response.json().await.map_err(ApiError::from)?;
        Ok(envelope.content)
    }
}

/// The backend wraps every payload in a content envelope.
#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    content: T,
}

/// Extracts a message (and optional code) from an error response body.
///
/// The backend answers errors as `{"error": {"message": ..., "code": ...}}`
/// or a bare `{"message": ...}`; anything else is reported verbatim.
fn parse_error_body(status: u16, body: String) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<ErrorDetail>,
        message: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: String,
        code: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            error: Some(detail),
            ..
        }) => ApiError::Http {
            status,
            message: detail.message,
            code: detail.code,
        },
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => ApiError::Http {
            status,
            message,
            code: None,
        },
        _ => ApiError::http(status, body),
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`RosterClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile
/// time.
///
/// # Required Fields
///
/// - `url` - The profile backend URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct RosterClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl RosterClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for RosterClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> RosterClientBuilder<Missing, P> {
    /// Sets the profile backend URL.
    pub fn url(self, url: impl Into<String>) -> RosterClientBuilder<Set<String>, P> {
        RosterClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> RosterClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> RosterClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        RosterClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> RosterClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl RosterClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`RosterClient`].
    ///
    /// This method is only available when both `url` and `token_provider`
    /// have been set.
    pub fn build(self) -> RosterClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        let mut base_url = self.url.0;
        while base_url.ends_with('/') {
            base_url.pop();
        }
        // Url::join treats the last path segment as a file without this.
        base_url.push('/');

        RosterClient {
            inner: Arc::new(RosterClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
