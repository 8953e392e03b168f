use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::user::errors::SessionError;
use crate::user::ports::SessionStore;

/// Redis-backed session store.
///
/// One key per username, value = the most recently issued token,
/// expiring on its TTL. Redis serializes concurrent writes to the same
/// key, so no in-process locking is needed.
pub struct RedisSessionStore {
    connection: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis and build the managed connection.
    ///
    /// The manager reconnects on its own after transient failures;
    /// a failure here, at startup, is fatal to the process.
    ///
    /// # Errors
    /// * `Unavailable` - URL is invalid or the server is unreachable
    pub async fn connect(url: &str) -> Result<Self, SessionError> {
        let client =
            Client::open(url).map_err(|e| SessionError::Unavailable(e.to_string()))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, username: &str, token: &str, ttl: Duration) -> Result<(), SessionError> {
        let mut connection = self.connection.clone();

        connection
            .set_ex::<_, _, ()>(username, token, ttl.as_secs())
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }

    async fn get(&self, username: &str) -> Result<Option<String>, SessionError> {
        let mut connection = self.connection.clone();

        connection
            .get::<_, Option<String>>(username)
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }

    async fn delete(&self, username: &str) -> Result<(), SessionError> {
        let mut connection = self.connection.clone();

        // DEL of a missing key is a no-op on the server side.
        connection
            .del::<_, ()>(username)
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }

    async fn ping(&self) -> Result<(), SessionError> {
        let mut connection = self.connection.clone();

        redis::cmd("PING")
            .query_async::<_, String>(&mut connection)
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }
}
