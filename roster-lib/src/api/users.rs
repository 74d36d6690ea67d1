//! User-record CRUD operations

use reqwest::Method;

use crate::RosterClient;
use crate::error::Error;
use crate::model::Record;
use crate::model::UserRecord;

impl RosterClient {
    /// Creates (or replaces) the profile record for a freshly registered
    /// account.
    ///
    /// The backend keys profiles by the identity provider's user id, so
    /// creation is a PUT to the profile's own path.
    pub async fn create_user(&self, user: &UserRecord) -> Result<UserRecord, Error> {
        self.fetch(Method::PUT, &format!("user/{}", user.id), Some(user))
            .await
    }

    /// Retrieves a profile by id.
    pub async fn user(&self, id: &str) -> Result<UserRecord, Error> {
        self.fetch::<UserRecord, ()>(Method::GET, &format!("user/{id}"), None)
            .await
    }

    /// Retrieves all profiles.
    pub async fn users(&self) -> Result<Vec<UserRecord>, Error> {
        self.fetch::<Vec<UserRecord>, ()>(Method::GET, "user", None)
            .await
    }

    /// Retrieves the profile of the user the session token belongs to.
    pub async fn current_user(&self) -> Result<UserRecord, Error> {
        let id = self.token_user_id().await?;
        self.user(&id).await
    }

    /// Applies a partial update to a profile and returns the new state.
    pub async fn update_user(&self, id: &str, patch: &Record) -> Result<UserRecord, Error> {
        self.fetch(Method::PATCH, &format!("user/{id}"), Some(patch))
            .await
    }
}
