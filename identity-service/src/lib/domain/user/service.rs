use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewCredential;
use crate::domain::user::models::PageParams;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenPayload;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

/// Fixed lifetime of a session entry. Revocation before this point
/// happens only through logout.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Credential usecase: orchestrates hashing, persistence, token
/// issuance, and the session write for register/login/logout.
///
/// Holds no cross-request state of its own; every operation is a
/// strictly sequential chain over the injected collaborators.
pub struct UserService<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    repository: Arc<R>,
    sessions: Arc<S>,
    password_hasher: auth::PasswordHasher,
    token_handler: Arc<auth::TokenHandler>,
}

impl<R, S> UserService<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    /// Create a new user service with injected collaborators.
    pub fn new(repository: Arc<R>, sessions: Arc<S>, token_handler: Arc<auth::TokenHandler>) -> Self {
        Self {
            repository,
            sessions,
            password_hasher: auth::PasswordHasher::new(),
            token_handler,
        }
    }

    /// Register a new user and hand back a live token.
    ///
    /// hash -> persist -> issue -> session write, in that order: each
    /// step's output feeds the next, so no reordering is possible.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Credential already registered
    /// * `Password` / `Token` / `Session` / `Database` - Step failure,
    ///   propagated unchanged
    pub async fn register(&self, command: RegisterCommand) -> Result<TokenPayload, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let id = self
            .repository
            .create(NewCredential {
                username: command.username.clone(),
                email: command.email.clone(),
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        let token = self
            .token_handler
            .issue(id, command.username.as_str(), command.email.as_str())?;

        // A token that cannot be confirmed live is not handed out, so a
        // failed session write fails the whole registration. The
        // credential row is deliberately left in place; see DESIGN.md.
        if let Err(e) = self
            .sessions
            .set(command.username.as_str(), &token, SESSION_TTL)
            .await
        {
            tracing::warn!(
                username = %command.username,
                error = %e,
                "session write failed after registration; credential row kept"
            );
            return Err(e.into());
        }

        Ok(self.token_payload(token))
    }

    /// Authenticate a user and hand back a live token.
    ///
    /// Unknown username and wrong password both return
    /// `InvalidCredentials`: the caller cannot tell them apart.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user, or password mismatch
    /// * `Password` / `Token` / `Session` / `Database` - Step failure
    pub async fn login(&self, command: LoginCommand) -> Result<TokenPayload, UserError> {
        let credential = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        match self
            .password_hasher
            .verify(&command.password, &credential.password_hash)
        {
            Ok(()) => {}
            Err(auth::PasswordError::Mismatch) => return Err(UserError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        }

        let token = self.token_handler.issue(
            credential.id,
            credential.username.as_str(),
            credential.email.as_str(),
        )?;

        self.sessions
            .set(credential.username.as_str(), &token, SESSION_TTL)
            .await?;

        Ok(self.token_payload(token))
    }

    /// Revoke the user's session. Tokens already issued stay
    /// cryptographically valid until their own expiry, but the bearer
    /// gate rejects them once the session entry is gone.
    ///
    /// # Errors
    /// * `Session` - Store unreachable
    pub async fn logout(&self, username: &str) -> Result<(), UserError> {
        self.sessions.delete(username).await?;
        Ok(())
    }

    /// Retrieve a user by id.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    /// * `Database` - Store operation failed
    pub async fn get_user(&self, id: i64) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Retrieve a page of users plus the total count.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    pub async fn list_users(&self, params: PageParams) -> Result<(Vec<User>, i64), UserError> {
        let users = self
            .repository
            .list(params.limit, params.offset())
            .await?;
        let total = self.repository.count().await?;
        Ok((users, total))
    }

    /// Health probe over both backing stores.
    ///
    /// # Errors
    /// * `Database` / `Session` - A store is unreachable
    pub async fn ping(&self) -> Result<(), UserError> {
        self.repository.ping().await?;
        self.sessions.ping().await?;
        Ok(())
    }

    fn token_payload(&self, token: String) -> TokenPayload {
        TokenPayload {
            token,
            expired: format!("{} Hour", self.token_handler.lifetime_hours()),
        }
    }
}
