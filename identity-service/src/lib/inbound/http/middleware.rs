use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

const BEARER_SCHEME: &str = "Bearer";

/// Identity attached to the request once the bearer gate passes.
/// Derived from verified token claims; never persisted.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub username: String,
}

/// Bearer gate: guards protected routes.
///
/// Checks, in order: header shape, scheme, non-empty credential,
/// token signature+expiry, and session liveness. Every rejection maps
/// to the same generic 401 regardless of which check failed; only the
/// logs distinguish the stages.
pub async fn bearer_gate<R, S>(
    State(state): State<AppState<R, S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository,
    S: SessionStore,
{
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let credential = match parts.next() {
        Some(credential) => credential,
        None => {
            // Do not log the header value: a bare token pasted without
            // the scheme would land a live credential in the logs.
            tracing::warn!("auth header missing or garbled");
            return Err(unauthorized());
        }
    };

    if scheme != BEARER_SCHEME {
        tracing::warn!(scheme = %scheme, "auth scheme is not Bearer");
        return Err(unauthorized());
    }

    if credential.is_empty() {
        tracing::warn!("auth credential is empty");
        return Err(unauthorized());
    }

    let claims = state.token_handler.verify(credential).map_err(|e| {
        tracing::warn!(error = %e, "token verification failed");
        unauthorized()
    })?;

    // Liveness check: a cryptographically valid token is rejected once
    // its session entry is gone, which is how logout takes effect
    // before the token's natural expiry. The cached value is not
    // compared against the presented token.
    match state.session_store.get(&claims.username).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(username = %claims.username, "session not live");
            return Err(unauthorized());
        }
        Err(e) => {
            tracing::warn!(username = %claims.username, error = %e, "session store check failed");
            return Err(unauthorized());
        }
    }

    req.extensions_mut().insert(AuthenticatedUser {
        id: claims.sub,
        email: claims.email,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    ApiError::Unauthorized.into_response()
}
