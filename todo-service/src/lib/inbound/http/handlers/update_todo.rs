use axum::extract::Path;
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
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(AppError::from)?;
    let command = body.try_into_command()?;

    state
        .todo_service
        .update_todo(&todo_id, &authenticated.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, "Todo updated successfully", todo.into()))
}

/// HTTP request body for a partial todo update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct UpdateTodoRequest {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    is_completed: Option<bool>,
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, AppError> {
        let title = self.title.map(TodoTitle::new).transpose()?;
        let description = self.description.map(TodoDescription::new).transpose()?;
        Ok(UpdateTodoCommand {
            title,
            description,
            due_date: self.due_date,
            is_completed: self.is_completed,
        })
    }
}
