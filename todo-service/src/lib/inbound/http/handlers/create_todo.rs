use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::errors::AppError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .todo_service
        .create_todo(&authenticated.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, "Todo created successfully", todo.into()))
}

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, AppError> {
        let title = TodoTitle::new(self.title)?;
        let description = self.description.map(TodoDescription::new).transpose()?;
        Ok(CreateTodoCommand {
            title,
            description,
            due_date: self.due_date,
        })
    }
}
