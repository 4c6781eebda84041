use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::errors::AppError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated identity resolved from the
/// bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that validates the bearer token and stores the acting
/// identity in request extensions.
///
/// Every failure mode (missing header, malformed header, bad signature,
/// wrong issuer or audience, expired token, unparseable subject) produces
/// the same 401 response; the reason is logged server-side only.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).ok_or_else(|| {
        tracing::info!("Missing or malformed Authorization header");
        unauthorized_response()
    })?;

    let claims = state.token_codec.validate(token).map_err(|_| {
        tracing::info!("Bearer token failed validation");
        unauthorized_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Valid token carries unparseable subject");
        unauthorized_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

fn unauthorized_response() -> Response {
    ApiError::from(AppError::unauthorized("Invalid or expired token")).into_response()
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    let auth_header = req.headers().get(http::header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}
