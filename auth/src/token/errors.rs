use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Raised by settings validation at startup; never per-request.
    #[error("Invalid token settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Every validation failure collapses to this variant. The subtype
    /// (bad signature, wrong issuer or audience, expired) is deliberately
    /// not exposed, so callers cannot probe why a token was rejected.
    #[error("Token is invalid")]
    Invalid,
}
