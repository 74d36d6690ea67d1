//! Token persistence (the browser localStorage analog)

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use super::AccessToken;
use crate::error::AuthError;

/// Trait for persisting session tokens across restarts.
///
/// A session saves its token here when opened with `stay_on`, restores from
/// it on startup, and clears it on logout. Implementations must tolerate a
/// missing or unreadable token by returning `None` from `load`.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the persisted token, if any.
    async fn load(&self) -> Option<AccessToken>;

    /// Persists the given token, replacing any previous one.
    async fn save(&self, token: &AccessToken) -> Result<(), AuthError>;

    /// Removes the persisted token.
    async fn clear(&self);
}

/// An in-memory token store.
///
/// Tokens vanish when the process exits; the session behaves as if the user
/// declined "stay signed in". Also handy in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }

    async fn save(&self, token: &AccessToken) -> Result<(), AuthError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) {
        *self.token.write().await = None;
    }
}

/// A token store backed by a JSON file on disk.
///
/// # Example
///
/// ```ignore
/// use roster_lib::auth::FileTokenStore;
///
/// let store = FileTokenStore::new("~/.config/roster/token.json");
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path the token is persisted at.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<AccessToken> {
        let bytes = tokio::fs::read(&self.path).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(token) => Some(token),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "discarding unreadable token file");
                None
            }
        }
    }

    async fn save(&self, token: &AccessToken) -> Result<(), AuthError> {
        let bytes = serde_json::to_vec_pretty(token).map_err(|e| AuthError::Store(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Store(e.to_string()))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }

    async fn clear(&self) {
        if let Err(err) = tokio::fs::remove_file(&self.path).await
            && err.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), %err, "failed to remove token file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.is_none());

        let token = AccessToken::new("tok", "u1");
        store.save(&token).await.unwrap();
        assert_eq!(store.load().await, Some(token));

        store.clear().await;
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("roster-token-{}.json", uuid::Uuid::new_v4()));
        let store = FileTokenStore::new(&path);
        assert!(store.load().await.is_none());

        let token = AccessToken::with_refresh("tok", "u1", None, "ref");
        store.save(&token).await.unwrap();
        assert_eq!(store.load().await, Some(token));

        store.clear().await;
        assert!(store.load().await.is_none());
        // Clearing twice is fine.
        store.clear().await;
    }
}
