use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::delete_todo::delete_todo;
use super::handlers::get_current_user::get_current_user;
use super::handlers::get_todo::get_todo;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::toggle_todo::toggle_todo;
use super::handlers::update_todo::update_todo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::todo::service::TodoService;
use crate::domain::user::service::AuthService;
use crate::outbound::repositories::todo::PostgresTodoRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub todo_service: Arc<TodoService<PostgresTodoRepository>>,
    pub token_codec: Arc<TokenCodec>,
}

pub fn create_router(
    auth_service: Arc<AuthService<PostgresUserRepository>>,
    todo_service: Arc<TodoService<PostgresTodoRepository>>,
    token_codec: Arc<TokenCodec>,
) -> Router {
    let state = AppState {
        auth_service,
        todo_service,
        token_codec,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(get_current_user))
        .route("/api/todos", get(list_todos))
        .route("/api/todos", post(create_todo))
        .route("/api/todos/:todo_id", get(get_todo))
        .route("/api/todos/:todo_id", patch(update_todo))
        .route("/api/todos/:todo_id", delete(delete_todo))
        .route("/api/todos/:todo_id/toggle", patch(toggle_todo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
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
