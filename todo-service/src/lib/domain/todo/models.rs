use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::todo::errors::TodoDescriptionError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::todo::errors::TodoTitleError;
use crate::domain::user::models::UserId;

/// Todo item aggregate, owned by a single user.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create a fresh, uncompleted todo for a user.
    pub fn new(user_id: UserId, command: CreateTodoCommand) -> Self {
        Self {
            id: TodoId::new(),
            user_id,
            title: command.title,
            description: command.description,
            is_completed: false,
            created_at: Utc::now(),
            updated_at: None,
            due_date: command.due_date,
            completed_at: None,
        }
    }

    /// Set the completion state, maintaining the completion timestamp.
    pub fn set_completed(&mut self, completed: bool) {
        if !self.is_completed && completed {
            self.completed_at = Some(Utc::now());
        } else if self.is_completed && !completed {
            self.completed_at = None;
        }
        self.is_completed = completed;
    }
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Title value type, 1-200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Title is empty
    /// * `TooLong` - Title longer than 200 characters
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        if title.is_empty() {
            return Err(TodoTitleError::Empty);
        }
        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Description value type, at most 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MAX_LENGTH: usize = 1000;

    /// # Errors
    /// * `TooLong` - Description longer than 1000 characters
    pub fn new(description: String) -> Result<Self, TodoDescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TodoDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new todo with validated fields
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Command to update an existing todo.
///
/// All fields are optional to support partial updates; only provided
/// fields are touched.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<TodoDescription>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}
