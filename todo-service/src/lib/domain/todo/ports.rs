use async_trait::async_trait;

use crate::domain::errors::AppError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::UserId;

/// Port for todo service operations.
///
/// Every operation is filtered by the acting user: a todo owned by someone
/// else is indistinguishable from one that does not exist.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List the user's todos, newest first.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn list_todos(&self, user_id: &UserId) -> Result<Vec<Todo>, AppError>;

    /// Retrieve one of the user's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo absent or owned by another user
    /// * `Unclassified` - Storage failure
    async fn get_todo(&self, id: &TodoId, user_id: &UserId) -> Result<Todo, AppError>;

    /// Create a todo owned by the user.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn create_todo(
        &self,
        user_id: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, AppError>;

    /// Partially update one of the user's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo absent or owned by another user
    /// * `Unclassified` - Storage failure
    async fn update_todo(
        &self,
        id: &TodoId,
        user_id: &UserId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, AppError>;

    /// Delete one of the user's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo absent or owned by another user
    /// * `Unclassified` - Storage failure
    async fn delete_todo(&self, id: &TodoId, user_id: &UserId) -> Result<(), AppError>;

    /// Flip the completion state of one of the user's todos.
    ///
    /// # Errors
    /// * `NotFound` - Todo absent or owned by another user
    /// * `Unclassified` - Storage failure
    async fn toggle_completion(&self, id: &TodoId, user_id: &UserId) -> Result<Todo, AppError>;
}

/// Persistence operations for the todo aggregate.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist a new todo.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn create(&self, todo: Todo) -> Result<Todo, AppError>;

    /// Retrieve a todo by identifier, `None` if absent.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError>;

    /// Retrieve a user's todos, newest first.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, AppError>;

    /// Update an existing todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Unclassified` - Storage failure
    async fn update(&self, todo: Todo) -> Result<Todo, AppError>;

    /// Remove a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Unclassified` - Storage failure
    async fn delete(&self, id: &TodoId) -> Result<(), AppError>;
}
