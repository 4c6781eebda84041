use std::error::Error as StdError;

use thiserror::Error;

/// Closed classification for every failure that crosses a service
/// boundary. Transport status and operator log severity are both total
/// functions over this set; they live side by side so a new kind cannot
/// be added to one mapping and forgotten in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Unauthorized,
    BusinessRule,
    Unclassified,
}

/// Log severity for the operator stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
    Critical,
}

impl ErrorKind {
    /// HTTP status code the boundary renders for this kind.
    pub fn status(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::Unauthorized => 401,
            ErrorKind::BusinessRule => 422,
            ErrorKind::Unclassified => 500,
        }
    }

    /// Base log severity for this kind.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorKind::NotFound | ErrorKind::Validation | ErrorKind::Unauthorized => {
                Severity::Information
            }
            ErrorKind::Conflict | ErrorKind::BusinessRule => Severity::Warning,
            ErrorKind::Unclassified => Severity::Error,
        }
    }
}

/// A classified failure: exactly one kind, a caller-facing message,
/// optional detail strings, and an optional source error.
///
/// Only `Unclassified` failures carry their source chain out to the log;
/// the boundary renders them to callers as an opaque generic message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Vec<String>,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    resource_exhaustion: bool,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
            source: None,
            resource_exhaustion: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BusinessRule, message)
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unclassified, message)
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_source(mut self, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Mark this failure as resource exhaustion (pool starvation and the
    /// like), escalating its log severity to Critical.
    pub fn resource_exhaustion(mut self) -> Self {
        self.resource_exhaustion = true;
        self
    }

    /// Log severity: the kind's base severity, escalated to Critical for
    /// resource-exhaustion failures.
    pub fn severity(&self) -> Severity {
        if self.resource_exhaustion {
            Severity::Critical
        } else {
            self.kind.severity()
        }
    }
}

impl From<auth::PasswordError> for AppError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::Empty => AppError::validation(err.to_string()),
            auth::PasswordError::HashingFailed(_) => {
                AppError::unclassified("Password hashing failed").with_source(err)
            }
        }
    }
}

impl From<auth::TokenError> for AppError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::Invalid => AppError::unauthorized("Invalid or expired token"),
            auth::TokenError::InvalidSettings(_) | auth::TokenError::EncodingFailed(_) => {
                AppError::unclassified("Token generation failed").with_source(err)
            }
        }
    }
}
