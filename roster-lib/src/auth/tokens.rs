//! Session token cache with automatic refresh

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::AccessToken;
use super::IdentityFlow;
use super::TokenProvider;
use super::TokenStore;
use crate::error::AuthError;

/// The session's shared token cache.
///
/// Cheap to clone (uses `Arc` internally) so it can be handed to a
/// [`RosterClient`](crate::RosterClient) as its [`TokenProvider`] while the
/// owning [`Session`](super::Session) keeps updating it on sign-in, account
/// update, and logout.
///
/// `get_token` returns the cached token while it is valid, refreshes it
/// through the identity flow when it is expiring soon, and mirrors every
/// change into the [`TokenStore`] when the session was opened with
/// "stay signed in".
#[derive(Clone)]
pub struct SessionTokens {
    inner: Arc<SessionTokensInner>,
}

struct SessionTokensInner {
    identity: IdentityFlow,
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<AccessToken>>,
    persist: AtomicBool,
    /// Refresh this much before actual expiry.
    refresh_buffer: Duration,
}

impl SessionTokens {
    /// Creates a new empty token cache.
    ///
    /// Uses a default refresh buffer of 5 minutes (tokens are refreshed
    /// 5 minutes before they expire).
    pub fn new(identity: IdentityFlow, store: impl TokenStore + 'static) -> Self {
        Self::with_refresh_buffer(identity, store, Duration::from_secs(300))
    }

    /// Creates a new token cache with a custom refresh buffer.
    pub fn with_refresh_buffer(
        identity: IdentityFlow,
        store: impl TokenStore + 'static,
        refresh_buffer: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(SessionTokensInner {
                identity,
                store: Arc::new(store),
                token: RwLock::new(None),
                persist: AtomicBool::new(false),
                refresh_buffer,
            }),
        }
    }

    /// Installs a freshly issued token.
    ///
    /// With `persist` set the token is also written to the store, and later
    /// refreshes keep the store up to date.
    pub(crate) async fn install(&self, token: AccessToken, persist: bool) -> Result<(), AuthError> {
        self.inner.persist.store(persist, Ordering::Relaxed);
        if persist {
            self.inner.store.save(&token).await?;
        } else {
            self.inner.store.clear().await;
        }
        *self.inner.token.write().await = Some(token);
        Ok(())
    }

    /// Restores a persisted token from the store, if one exists.
    pub(crate) async fn restore(&self) -> Option<AccessToken> {
        let token = self.inner.store.load().await?;
        self.inner.persist.store(true, Ordering::Relaxed);
        *self.inner.token.write().await = Some(token.clone());
        Some(token)
    }

    /// Drops the cached token and clears the store.
    pub(crate) async fn discard(&self) {
        *self.inner.token.write().await = None;
        self.inner.persist.store(false, Ordering::Relaxed);
        self.inner.store.clear().await;
    }

    /// Returns the cached token without refreshing it.
    pub async fn current(&self) -> Option<AccessToken> {
        self.inner.token.read().await.clone()
    }

    fn needs_refresh(&self, token: &AccessToken) -> bool {
        let buffer = chrono::Duration::from_std(self.inner.refresh_buffer)
            .unwrap_or(chrono::Duration::zero());
        token.expires_within(buffer)
    }
}

#[async_trait]
impl TokenProvider for SessionTokens {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        // Fast path: valid cached token.
        {
            let guard = self.inner.token.read().await;
            match &*guard {
                Some(token) if !self.needs_refresh(token) => return Ok(token.clone()),
                Some(_) => {}
                None => return Err(AuthError::NotSignedIn),
            }
        }

        // Slow path: refresh under the write lock.
        let mut guard = self.inner.token.write().await;

        // Double-check after acquiring it (another task may have refreshed).
        let token = match &*guard {
            Some(token) if !self.needs_refresh(token) => return Ok(token.clone()),
            Some(token) => token,
            None => return Err(AuthError::NotSignedIn),
        };

        let Some(refresh_token) = token.refresh_token.clone() else {
            return Err(AuthError::TokenExpired {
                message: "session token expired and no refresh token is available".to_string(),
            });
        };

        debug!("refreshing session token");
        let new_token = match self.inner.identity.refresh(&refresh_token).await {
            Ok(token) => token,
            Err(err) => {
                // The refresh token is burned; drop state so the caller
                // lands in a clean signed-out session.
                *guard = None;
                self.inner.store.clear().await;
                return Err(err);
            }
        };

        if self.inner.persist.load(Ordering::Relaxed) {
            self.inner.store.save(&new_token).await?;
        }
        *guard = Some(new_token.clone());
        Ok(new_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    fn tokens() -> SessionTokens {
        SessionTokens::new(IdentityFlow::new("test-key"), MemoryTokenStore::new())
    }

    #[tokio::test]
    async fn empty_cache_reports_not_signed_in() {
        let tokens = tokens();
        assert!(matches!(
            tokens.get_token().await,
            Err(AuthError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn returns_cached_token_while_valid() {
        let tokens = tokens();
        let token = AccessToken::new("tok", "u1");
        tokens.install(token.clone(), false).await.unwrap();
        assert_eq!(tokens.get_token().await.unwrap(), token);
    }

    #[tokio::test]
    async fn install_without_persist_leaves_store_empty() {
        let store = Arc::new(MemoryTokenStore::new());
        let tokens = SessionTokens {
            inner: Arc::new(SessionTokensInner {
                identity: IdentityFlow::new("test-key"),
                store: store.clone(),
                token: RwLock::new(None),
                persist: AtomicBool::new(false),
                refresh_buffer: Duration::from_secs(300),
            }),
        };

        tokens
            .install(AccessToken::new("tok", "u1"), false)
            .await
            .unwrap();
        assert!(store.load().await.is_none());

        tokens
            .install(AccessToken::new("tok2", "u1"), true)
            .await
            .unwrap();
        assert!(store.load().await.is_some());
    }

    #[tokio::test]
    async fn discard_clears_cache_and_store() {
        let tokens = tokens();
        tokens
            .install(AccessToken::new("tok", "u1"), true)
            .await
            .unwrap();
        tokens.discard().await;
        assert!(tokens.current().await.is_none());
        assert!(matches!(
            tokens.get_token().await,
            Err(AuthError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn expired_token_without_refresh_reports_expiry() {
        let tokens = tokens();
        let token = AccessToken {
            id_token: "tok".to_string(),
            user_id: "u1".to_string(),
            expires_at: Some(chrono::Utc::now() - chrono::Duration::minutes(1)),
            refresh_token: None,
        };
        tokens.install(token, false).await.unwrap();
        assert!(matches!(
            tokens.get_token().await,
            Err(AuthError::TokenExpired { .. })
        ));
    }
}
