//! Credential and token primitives for the todo service.
//!
//! Provides the two security-sensitive building blocks behind
//! registration and login:
//! - Password custody (Argon2id): hashing, fail-closed verification,
//!   rehash detection when the work factor changes, and strength checks
//! - Signed bearer tokens (HMAC-SHA256): issuance and validation of
//!   stateless, time-bound identity assertions
//!
//! The service layer owns the orchestration (lookups, uniqueness,
//! persistence); this crate stays free of storage and transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.needs_rehash(&hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenSettings};
//!
//! let settings = TokenSettings {
//!     secret: "an_example_secret_key_of_32_bytes!!".to_string(),
//!     issuer: "todo-service".to_string(),
//!     audience: "todo-app".to_string(),
//!     expiration_hours: 24,
//!     refresh_expiration_days: 7,
//! };
//!
//! let codec = TokenCodec::new(&settings).unwrap();
//! let issued = codec.issue("user123", "alice", "alice@example.com").unwrap();
//! let claims = codec.validate(&issued.token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::validate_strength;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::StrengthReport;
pub use token::Claims;
pub use token::IssuedToken;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenSettings;
