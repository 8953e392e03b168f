use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

/// Revokes the caller's session. The bearer gate has already verified
/// the token and attached the identity; from here on the token is dead
/// for gated routes even though it stays cryptographically valid.
pub async fn logout<R, S>(
    State(state): State<AppState<R, S>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<()>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    state
        .user_service
        .logout(&user.username)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::empty(StatusCode::OK))
}
