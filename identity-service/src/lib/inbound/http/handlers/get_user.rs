use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::list_users::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

pub async fn get_user<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    state
        .user_service
        .get_user(id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
