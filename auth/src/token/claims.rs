use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload for an authenticated principal.
///
/// Carries the principal identity (numeric id, username, email) plus
/// the registered issued-at and expiry instants as unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the principal's numeric id
    pub sub: i64,

    /// Username of the principal
    pub username: String,

    /// Email of the principal
    pub email: String,

    /// Issued at (unix timestamp)
    pub iat: i64,

    /// Expiration (unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a principal, expiring `lifetime_hours` from now.
    pub fn for_principal(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        lifetime_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(lifetime_hours);

        Self {
            sub: id,
            username: username.into(),
            email: email.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
