//! The authenticated user session

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::RwLock;
use tracing::debug;

use super::IdentityFlow;
use super::SessionTokens;
use super::TokenProvider;
use crate::RosterClient;
use crate::error::Error;
use crate::model::Record;
use crate::model::UserRecord;

/// Sign-in credentials collected by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Sign-in email address.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Persist the session across restarts ("stay signed in").
    pub stay_on: bool,
}

/// An explicit session over the identity provider and the profile backend.
///
/// The session owns the current-user state: it is populated by
/// [`restore`](Session::restore) on startup (from a persisted token),
/// updated by [`log_in`](Session::log_in), [`sign_up`](Session::sign_up),
/// and [`update`](Session::update), and torn down by
/// [`log_out`](Session::log_out), which clears both the persisted token and
/// the in-memory state.
///
/// # Example
///
/// ```ignore
/// use roster_lib::RosterClient;
/// use roster_lib::auth::{Credentials, FileTokenStore, IdentityFlow, Session, SessionTokens};
///
/// let identity = IdentityFlow::new(api_key);
/// let tokens = SessionTokens::new(identity.clone(), FileTokenStore::new(token_path));
/// let client = RosterClient::builder()
///     .url("https://api.roster.example")
///     .token_provider(tokens.clone())
///     .build();
///
/// let session = Session::new(identity, tokens, client);
/// if !session.restore().await? {
///     session.log_in(Credentials {
///         email: "user@example.com".into(),
///         password: "Abc12345".into(),
///         stay_on: true,
///     }).await?;
/// }
/// ```
pub struct Session {
    identity: IdentityFlow,
    tokens: SessionTokens,
    client: RosterClient,
    user: RwLock<Option<UserRecord>>,
    loading: AtomicBool,
}

impl Session {
    /// Creates a new signed-out session.
    ///
    /// The `tokens` cache must be the same one handed to the client as its
    /// token provider, otherwise the client cannot see sign-ins.
    pub fn new(identity: IdentityFlow, tokens: SessionTokens, client: RosterClient) -> Self {
        Self {
            identity,
            tokens,
            client,
            user: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Returns the signed-in user's profile, if any.
    pub async fn current_user(&self) -> Option<UserRecord> {
        self.user.read().await.clone()
    }

    /// Returns `true` if a user is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Returns `true` while the session is restoring or fetching the
    /// current user.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    /// Returns the profile client this session drives.
    pub fn client(&self) -> &RosterClient {
        &self.client
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Restores a persisted session, if one exists.
    ///
    /// Loads the persisted token and fetches the current user's profile.
    /// Returns `false` when there is nothing to restore. A failed profile
    /// fetch leaves the session signed out and propagates the error.
    pub async fn restore(&self) -> Result<bool, Error> {
        if self.tokens.restore().await.is_none() {
            return Ok(false);
        }

        self.loading.store(true, Ordering::Relaxed);
        let fetched = self.client.current_user().await;
        self.loading.store(false, Ordering::Relaxed);

        match fetched {
            Ok(user) => {
                debug!(user_id = %user.id, "session restored");
                *self.user.write().await = Some(user);
                Ok(true)
            }
            Err(err) => {
                self.tokens.discard().await;
                Err(err)
            }
        }
    }

    /// Signs in with email and password.
    ///
    /// With `stay_on` set, the token is persisted so the session survives a
    /// restart.
    pub async fn log_in(&self, credentials: Credentials) -> Result<(), Error> {
        let token = self
            .identity
            .sign_in(&credentials.email, &credentials.password)
            .await?;
        self.tokens.install(token, credentials.stay_on).await?;

        self.loading.store(true, Ordering::Relaxed);
        let fetched = self.client.current_user().await;
        self.loading.store(false, Ordering::Relaxed);

        let user = fetched?;
        debug!(user_id = %user.id, "signed in");
        *self.user.write().await = Some(user);
        Ok(())
    }

    /// Registers a new account from a validated registration record.
    ///
    /// Creates the identity account, then the profile record. The record
    /// must carry `email`, `password`, and `name`; `profession`, `sex`, and
    /// `qualities` are taken when present. Rating, meeting count, and avatar
    /// start with generated values.
    pub async fn sign_up(&self, record: &Record) -> Result<UserRecord, Error> {
        let email = required_string(record, "email")?;
        let password = required_string(record, "password")?;
        let name = required_string(record, "name")?;

        let token = self.identity.sign_up(email, password).await?;
        let user_id = token.user_id.clone();
        self.tokens.install(token, true).await?;

        let mut user = UserRecord::new(user_id, email, name);
        user.profession = record.get_string("profession").ok().flatten().map(String::from);
        user.sex = record.get_string("sex").ok().flatten().map(String::from);
        if let Ok(Some(qualities)) = record.get_options("qualities") {
            user.qualities = qualities.iter().map(|q| q.id.clone()).collect();
        }

        let mut rng = rand::rng();
        user.rate = rng.random_range(1..=5);
        user.completed_meetings = rng.random_range(0..=200);
        user.image = avatar_url(&mut rng);

        let created = self.client.create_user(&user).await?;
        debug!(user_id = %created.id, "account registered");
        *self.user.write().await = Some(created.clone());
        Ok(created)
    }

    /// Updates the account email/password and the profile record.
    ///
    /// The identity provider issues a fresh token for the changed
    /// credentials; the profile patch is applied afterwards and the
    /// current-user state refetched.
    pub async fn update(
        &self,
        email: &str,
        password: &str,
        record: &Record,
    ) -> Result<UserRecord, Error> {
        let token = self.tokens.get_token().await?;
        let new_token = self
            .identity
            .update_account(&token.id_token, email, password)
            .await?;
        let user_id = new_token.user_id.clone();
        self.tokens.install(new_token, true).await?;

        let mut patch = record.clone();
        patch.insert("email", email);
        patch.remove("password");
        self.client.update_user(&user_id, &patch).await?;

        let user = self.client.current_user().await?;
        debug!(user_id = %user.id, "profile updated");
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// Signs out: clears the persisted token and the in-memory state.
    pub async fn log_out(&self) {
        debug!("signed out");
        self.tokens.discard().await;
        *self.user.write().await = None;
    }
}

fn required_string<'a>(record: &'a Record, field: &str) -> Result<&'a str, Error> {
    record
        .get_string(field)?
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::InvalidOperation(format!("{field} is required to sign up")))
}

/// Generated avatar URL with a short random seed.
fn avatar_url(rng: &mut impl Rng) -> String {
    let seed: String = rng
        .sample_iter(Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();
    format!("https://avatars.dicebear.com/api/avataaars/{seed}.svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionRef;

    #[test]
    fn required_string_rejects_blank_and_missing() {
        let record = Record::new().set("email", "  ");
        assert!(required_string(&record, "email").is_err());
        assert!(required_string(&record, "password").is_err());

        let record = record.set("email", "a@b.com");
        assert_eq!(required_string(&record, "email").unwrap(), "a@b.com");
    }

    #[test]
    fn avatar_urls_are_well_formed() {
        let mut rng = rand::rng();
        let url = avatar_url(&mut rng);
        assert!(url.starts_with("https://avatars.dicebear.com/api/avataaars/"));
        assert!(url.ends_with(".svg"));
    }

    #[test]
    fn qualities_extracted_as_ids() {
        let record = Record::new().set(
            "qualities",
            vec![OptionRef::new("q1", "Patience"), OptionRef::new("q2", "Wit")],
        );
        let qualities = record.get_options("qualities").unwrap().unwrap();
        let ids: Vec<&str> = qualities.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }
}
