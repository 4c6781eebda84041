use thiserror::Error;

use crate::domain::errors::AppError;

/// Error for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo id: {0}")]
    InvalidFormat(String),
}

/// Error for TodoTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTitleError {
    #[error("Title cannot be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for TodoDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

impl From<TodoIdError> for AppError {
    fn from(err: TodoIdError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<TodoTitleError> for AppError {
    fn from(err: TodoTitleError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<TodoDescriptionError> for AppError {
    fn from(err: TodoDescriptionError) -> Self {
        AppError::validation(err.to_string())
    }
}
