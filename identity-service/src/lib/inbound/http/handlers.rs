use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod get_user;
pub mod health;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod register;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }

    pub fn with_meta(status: StatusCode, data: T, meta: PageMeta) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data).meta(meta)))
    }
}

impl ApiSuccess<()> {
    /// 200-style response with no data payload (logout, mainly).
    pub fn empty(status: StatusCode) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::empty(status)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    // Deliberately carries no detail: every authentication failure
    // looks the same to the client.
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong".to_string(),
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "dependency unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service unavailable".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        };

        (status, Json(ApiResponseBody::<()>::error(message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized,
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameTaken(_) | UserError::EmailTaken(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::Session(_)
            | UserError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Pagination block attached to listing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Uniform response envelope: {status, message, meta?, data?}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: status_code
                .canonical_reason()
                .unwrap_or("OK")
                .to_string(),
            meta: None,
            data: Some(data),
        }
    }

    pub fn empty(status_code: StatusCode) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: status_code
                .canonical_reason()
                .unwrap_or("OK")
                .to_string(),
            meta: None,
            data: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message,
            meta: None,
            data: None,
        }
    }

    fn meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}
