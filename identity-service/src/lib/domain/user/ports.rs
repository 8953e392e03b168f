use std::time::Duration;

use async_trait::async_trait;

use crate::domain::user::models::Credential;
use crate::domain::user::models::NewCredential;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::SessionError;
use crate::user::errors::UserError;

/// Persistence operations for user credentials.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new credential row.
    ///
    /// # Returns
    /// The store-assigned numeric id
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Uniqueness violation
    /// * `Database` - Store operation failed
    async fn create(&self, credential: NewCredential) -> Result<i64, UserError>;

    /// Retrieve the full credential (including password digest) by
    /// username. Used by login only.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Credential>, UserError>;

    /// Retrieve the public view of a user by id.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError>;

    /// Retrieve a page of users, newest first.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserError>;

    /// Total number of registered users.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn count(&self) -> Result<i64, UserError>;

    /// Health probe against the relational store.
    ///
    /// # Errors
    /// * `Database` - Store is unreachable
    async fn ping(&self) -> Result<(), UserError>;
}

/// Shared key-value store recording the currently-live token per
/// username. Single logical namespace; the store's own single-key
/// atomicity is the only serialization relied upon.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Write-through set: unconditionally overwrites any prior entry
    /// for the username, with the given time-to-live.
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable or erroring
    async fn set(&self, username: &str, token: &str, ttl: Duration) -> Result<(), SessionError>;

    /// Liveness probe: the currently recorded token for the username,
    /// or None when no session is live.
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable or erroring
    async fn get(&self, username: &str) -> Result<Option<String>, SessionError>;

    /// Remove the session entry. Idempotent: absence of a prior key is
    /// not an error.
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable or erroring
    async fn delete(&self, username: &str) -> Result<(), SessionError>;

    /// Health probe against the session store.
    ///
    /// # Errors
    /// * `Unavailable` - Store is unreachable
    async fn ping(&self) -> Result<(), SessionError>;
}
