use std::sync::Arc;
use std::time::Duration;

use auth::TokenHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::middleware::bearer_gate;
use crate::domain::user::service::UserService;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;

pub struct AppState<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    pub user_service: Arc<UserService<R, S>>,
    pub session_store: Arc<S>,
    pub token_handler: Arc<TokenHandler>,
}

// Manual impl: R and S live behind Arcs, no Clone bound needed on them.
impl<R, S> Clone for AppState<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            session_store: Arc::clone(&self.session_store),
            token_handler: Arc::clone(&self.token_handler),
        }
    }
}

pub fn create_router<R, S>(
    user_service: Arc<UserService<R, S>>,
    session_store: Arc<S>,
    token_handler: Arc<TokenHandler>,
) -> Router
where
    R: UserRepository,
    S: SessionStore,
{
    let state = AppState {
        user_service,
        session_store,
        token_handler,
    };

    let public_routes = Router::new()
        .route("/v1/health", get(health::<R, S>))
        .route("/v1/users/register", post(register::<R, S>))
        .route("/v1/users/login", post(login::<R, S>));

    let protected_routes = Router::new()
        .route("/v1/users/logout", post(logout::<R, S>))
        .route("/v1/users", get(list_users::<R, S>))
        .route("/v1/users/:id", get(get_user::<R, S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_gate::<R, S>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
