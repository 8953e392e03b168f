//! Authentication primitives for the identity service.
//!
//! Two independent concerns live here:
//! - Password hashing (Argon2id) with a distinguished mismatch error,
//!   so callers can tell "wrong password" apart from "broken digest".
//! - Signed claims tokens (JWT/HS256) with a fixed lifetime and an
//!   explicit verification failure taxonomy (malformed, bad signature,
//!   expired).
//!
//! Both are pure in-process computation; neither holds connection state.
//! Session liveness is deliberately out of scope here: it belongs to the
//! service's session store, not to token cryptography.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenHandler;
//!
//! let handler = TokenHandler::new(b"secret_key_at_least_32_bytes_long!", 1);
//! let token = handler.issue(42, "alice", "alice@example.com").unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenHandler;
