use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::PageMeta;
use crate::domain::user::models::PageParams;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

pub async fn list_users<R, S>(
    State(state): State<AppState<R, S>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    let params = PageParams::new(query.page, query.limit);

    let (users, total) = state
        .user_service
        .list_users(params)
        .await
        .map_err(ApiError::from)?;

    let data = users.iter().map(UserData::from).collect();
    let meta = PageMeta {
        total,
        page: params.page,
        limit: params.limit,
    };

    Ok(ApiSuccess::with_meta(StatusCode::OK, data, meta))
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
