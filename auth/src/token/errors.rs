use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are split into the three kinds the boundary
/// layer logs separately, even though all of them collapse into the
/// same client-visible unauthorized status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
