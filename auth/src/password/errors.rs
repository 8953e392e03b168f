use thiserror::Error;

/// Error type for password operations.
///
/// `Mismatch` is a distinct variant so callers can map it to an
/// authentication failure without string inspection, while the other
/// variants stay internal errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password digest is malformed: {0}")]
    InvalidHash(String),

    #[error("Password does not match stored digest")]
    Mismatch,
}
