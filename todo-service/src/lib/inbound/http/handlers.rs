use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::AppError;
use crate::domain::errors::ErrorKind;
use crate::domain::errors::Severity;

pub mod create_todo;
pub mod delete_todo;
pub mod get_current_user;
pub mod get_todo;
pub mod list_todos;
pub mod login;
pub mod register;
pub mod toggle_todo;
pub mod update_todo;

/// Envelope shared by every response, success or failure, so clients
/// never branch parsers by outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    data: Option<T>,
    errors: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Boundary dispatcher: renders a classified failure as a wire response.
///
/// The transport status comes from the error kind's total mapping, the log
/// line is emitted at the kind's severity, and only `Unclassified`
/// failures keep their diagnostic detail server-side while the caller
/// receives an opaque generic message.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;

        let mut correlation_id = Uuid::new_v4().simple().to_string();
        correlation_id.truncate(8);

        let status = StatusCode::from_u16(error.kind.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match error.severity() {
            Severity::Information => {
                tracing::info!(
                    kind = ?error.kind,
                    correlation_id = %correlation_id,
                    "{}", error
                );
            }
            Severity::Warning => {
                tracing::warn!(
                    kind = ?error.kind,
                    correlation_id = %correlation_id,
                    "{}", error
                );
            }
            Severity::Error => {
                tracing::error!(
                    kind = ?error.kind,
                    correlation_id = %correlation_id,
                    source = ?error.source,
                    "{}", error
                );
            }
            Severity::Critical => {
                tracing::error!(
                    kind = ?error.kind,
                    correlation_id = %correlation_id,
                    source = ?error.source,
                    severity = "critical",
                    "{}", error
                );
            }
        }

        let (message, errors) = match error.kind {
            ErrorKind::Unclassified => (
                "An internal server error occurred".to_string(),
                vec!["Something went wrong".to_string()],
            ),
            _ => {
                let errors = if error.details.is_empty() {
                    vec![error.message.clone()]
                } else {
                    error.details
                };
                (error.message, errors)
            }
        };

        let body = ApiResponseBody::<serde_json::Value>::error(message, errors);
        let mut response = (status, Json(body)).into_response();

        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response.headers_mut().insert("X-Correlation-ID", value);
        }

        response
    }
}

/// Caller-facing view of a user; the password hash never leaves the
/// domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&crate::domain::user::models::User> for UserData {
    fn from(user: &crate::domain::user::models::User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Session payload returned by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserData,
}

impl From<&crate::domain::user::models::AuthSession> for SessionResponseData {
    fn from(session: &crate::domain::user::models::AuthSession) -> Self {
        Self {
            token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            expires_at: session.expires_at,
            user: UserData::from(&session.user),
        }
    }
}

/// Caller-facing view of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&crate::domain::todo::models::Todo> for TodoData {
    fn from(todo: &crate::domain::todo::models::Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.as_str().to_string(),
            description: todo
                .description
                .as_ref()
                .map(|description| description.as_str().to_string()),
            is_completed: todo.is_completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
            due_date: todo.due_date,
            completed_at: todo.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_follows_kind() {
        for (error, expected) in [
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (AppError::validation("bad input"), StatusCode::BAD_REQUEST),
            (AppError::conflict("taken"), StatusCode::CONFLICT),
            (AppError::unauthorized("no"), StatusCode::UNAUTHORIZED),
            (
                AppError::business_rule("rule"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::unclassified("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ] {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected);
            assert!(response.headers().contains_key("X-Correlation-ID"));
        }
    }

    #[test]
    fn test_unclassified_is_rendered_opaque() {
        let error = AppError::unclassified("connection to 10.0.0.3:5432 refused");
        let body = match error.kind {
            ErrorKind::Unclassified => {
                ApiResponseBody::<serde_json::Value>::error(
                    "An internal server error occurred",
                    vec!["Something went wrong".to_string()],
                )
            }
            _ => unreachable!(),
        };

        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered["success"], false);
        assert_eq!(rendered["message"], "An internal server error occurred");
        assert_eq!(rendered["data"], serde_json::Value::Null);
    }

    #[test]
    fn test_envelope_shape() {
        let body = ApiResponseBody::success("Success", serde_json::json!({"id": 1}));
        let rendered = serde_json::to_value(&body).unwrap();

        assert_eq!(rendered["success"], true);
        assert_eq!(rendered["message"], "Success");
        assert_eq!(rendered["data"]["id"], 1);
        assert_eq!(rendered["errors"], serde_json::json!([]));
        assert!(rendered["timestamp"].is_string());
    }
}
