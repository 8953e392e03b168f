use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::TokenPayload;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

pub async fn login<R, S>(
    State(state): State<AppState<R, S>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenPayload>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    // A username that cannot even pass validation matches no account;
    // surface the same generic failure as a wrong password would.
    let username = Username::new(body.username).map_err(|_| ApiError::Unauthorized)?;

    state
        .user_service
        .login(LoginCommand {
            username,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|payload| ApiSuccess::new(StatusCode::OK, payload))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}
