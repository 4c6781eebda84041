use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::AppError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::models::UserId;

/// Domain service for ownership-filtered todo operations.
pub struct TodoService<R>
where
    R: TodoRepository,
{
    repository: Arc<R>,
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch a todo only if it exists and belongs to the user.
    async fn owned_todo(&self, id: &TodoId, user_id: &UserId) -> Result<Todo, AppError> {
        match self.repository.find_by_id(id).await? {
            Some(todo) if todo.user_id == *user_id => Ok(todo),
            // A foreign todo is reported exactly like a missing one.
            _ => Err(AppError::not_found(format!(
                "Todo with id '{}' was not found",
                id
            ))),
        }
    }
}

#[async_trait]
impl<R> TodoServicePort for TodoService<R>
where
    R: TodoRepository,
{
    async fn list_todos(&self, user_id: &UserId) -> Result<Vec<Todo>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    async fn get_todo(&self, id: &TodoId, user_id: &UserId) -> Result<Todo, AppError> {
        self.owned_todo(id, user_id).await
    }

    async fn create_todo(
        &self,
        user_id: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, AppError> {
        self.repository.create(Todo::new(*user_id, command)).await
    }

    async fn update_todo(
        &self,
        id: &TodoId,
        user_id: &UserId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, AppError> {
        let mut todo = self.owned_todo(id, user_id).await?;

        if let Some(title) = command.title {
            todo.title = title;
        }
        if let Some(description) = command.description {
            todo.description = Some(description);
        }
        if let Some(due_date) = command.due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(completed) = command.is_completed {
            todo.set_completed(completed);
        }
        todo.updated_at = Some(Utc::now());

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, id: &TodoId, user_id: &UserId) -> Result<(), AppError> {
        let todo = self.owned_todo(id, user_id).await?;
        self.repository.delete(&todo.id).await
    }

    async fn toggle_completion(&self, id: &TodoId, user_id: &UserId) -> Result<Todo, AppError> {
        let mut todo = self.owned_todo(id, user_id).await?;

        let completed = !todo.is_completed;
        todo.set_completed(completed);
        todo.updated_at = Some(Utc::now());

        self.repository.update(todo).await
    }
}
