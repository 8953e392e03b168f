use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

/// Pings both backing stores. Unreachable stores surface as 503.
pub async fn health<R, S>(
    State(state): State<AppState<R, S>>,
) -> Result<ApiSuccess<()>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    state
        .user_service
        .ping()
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))
        .map(|()| ApiSuccess::empty(StatusCode::OK))
}
