use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::storage_error;
use crate::domain::errors::AppError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl TodoRow {
    fn try_into_todo(self) -> Result<Todo, AppError> {
        Ok(Todo {
            id: TodoId(self.id),
            user_id: UserId(self.user_id),
            title: TodoTitle::new(self.title)?,
            description: self.description.map(TodoDescription::new).transpose()?,
            is_completed: self.is_completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
            due_date: self.due_date,
            completed_at: self.completed_at,
        })
    }
}

const SELECT_TODO: &str = "SELECT id, user_id, title, description, is_completed, \
     created_at, updated_at, due_date, completed_at FROM todos";

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, AppError> {
        sqlx::query(
            "INSERT INTO todos (id, user_id, title, description, is_completed, \
             created_at, updated_at, due_date, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(todo.id.0)
        .bind(todo.user_id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_ref().map(|d| d.as_str()))
        .bind(todo.is_completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .bind(todo.due_date)
        .bind(todo.completed_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        sqlx::query_as::<_, TodoRow>(&format!("{} WHERE id = $1", SELECT_TODO))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .map(TodoRow::try_into_todo)
            .transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, AppError> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_TODO
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(TodoRow::try_into_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, AppError> {
        let result = sqlx::query(
            "UPDATE todos SET title = $2, description = $3, is_completed = $4, \
             updated_at = $5, due_date = $6, completed_at = $7 WHERE id = $1",
        )
        .bind(todo.id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_ref().map(|d| d.as_str()))
        .bind(todo.is_completed)
        .bind(todo.updated_at)
        .bind(todo.due_date)
        .bind(todo.completed_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Todo with id '{}' was not found",
                todo.id
            )));
        }

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Todo with id '{}' was not found",
                id
            )));
        }

        Ok(())
    }
}
