pub mod todo;
pub mod user;

pub use todo::PostgresTodoRepository;
pub use user::PostgresUserRepository;

use crate::domain::errors::AppError;

/// Classify a sqlx failure as an unclassified storage error.
///
/// Pool starvation is marked as resource exhaustion so the boundary logs
/// it at Critical severity.
pub(crate) fn storage_error(e: sqlx::Error) -> AppError {
    let exhausted = matches!(e, sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed);
    let error = AppError::unclassified("Database operation failed").with_source(e);
    if exhausted {
        error.resource_exhaustion()
    } else {
        error
    }
}
