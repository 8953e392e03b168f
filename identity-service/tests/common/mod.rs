use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::TokenHandler;
use identity_service::domain::user::models::Credential;
use identity_service::domain::user::models::NewCredential;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::Username;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::SessionError;
use identity_service::user::errors::UserError;
use identity_service::user::ports::SessionStore;
use identity_service::user::ports::UserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_LIFETIME_HOURS: i64 = 1;

/// In-memory user repository mirroring the MySQL adapter's contract:
/// auto-incremented ids, unique usernames and emails.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<Credential>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.username.as_str() == username)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, credential: NewCredential) -> Result<i64, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|c| c.username.as_str() == credential.username.as_str())
        {
            return Err(UserError::UsernameTaken(
                credential.username.as_str().to_string(),
            ));
        }
        if users
            .iter()
            .any(|c| c.email.as_str() == credential.email.as_str())
        {
            return Err(UserError::EmailTaken(credential.email.as_str().to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.push(Credential {
            id,
            username: credential.username,
            email: credential.email,
            password_hash: credential.password_hash,
            created_at: credential.created_at,
        });
        Ok(id)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| User {
                id: c.id,
                username: c.username.clone(),
                email: c.email.clone(),
                created_at: c.created_at,
            }))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|c| User {
                id: c.id,
                username: c.username.clone(),
                email: c.email.clone(),
                created_at: c.created_at,
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn ping(&self) -> Result<(), UserError> {
        Ok(())
    }
}

/// In-memory session store. TTL is accepted but not enforced; the
/// tests that need expiry exercise the token side instead.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_token(&self, username: &str) -> Option<String> {
        self.entries.lock().unwrap().get(username).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, username: &str, token: &str, _ttl: Duration) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap()
            .insert(username.to_string(), token.to_string());
        Ok(())
    }

    async fn get(&self, username: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.lock().unwrap().get(username).cloned())
    }

    async fn delete(&self, username: &str) -> Result<(), SessionError> {
        self.entries.lock().unwrap().remove(username);
        Ok(())
    }

    async fn ping(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Session store whose every operation fails, for dependency-failure
/// scenarios.
pub struct UnavailableSessionStore;

#[async_trait]
impl SessionStore for UnavailableSessionStore {
    async fn set(&self, _username: &str, _token: &str, _ttl: Duration) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _username: &str) -> Result<Option<String>, SessionError> {
        Err(SessionError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _username: &str) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("connection refused".to_string()))
    }
}

/// Test application that spawns a real server over in-memory stores.
pub struct TestApp<S: SessionStore> {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub sessions: Arc<S>,
    pub token_handler: TokenHandler,
    pub api_client: reqwest::Client,
}

impl TestApp<InMemorySessionStore> {
    pub async fn spawn() -> Self {
        Self::spawn_with_sessions(InMemorySessionStore::new()).await
    }
}

impl TestApp<UnavailableSessionStore> {
    pub async fn spawn_with_unavailable_sessions() -> Self {
        Self::spawn_with_sessions(UnavailableSessionStore).await
    }
}

impl<S: SessionStore> TestApp<S> {
    pub async fn spawn_with_sessions(sessions: S) -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(sessions);
        let token_handler = Arc::new(TokenHandler::new(TEST_SECRET, TEST_LIFETIME_HOURS));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&sessions),
            Arc::clone(&token_handler),
        ));

        let router = create_router(
            user_service,
            Arc::clone(&sessions),
            Arc::clone(&token_handler),
        );

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            sessions,
            token_handler: TokenHandler::new(TEST_SECRET, TEST_LIFETIME_HOURS),
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register a user through the API and return the issued token.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/v1/users/register")
            .json(&serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(
            response.status().is_success(),
            "registration failed: {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().expect("missing token").to_string()
    }
}
