pub mod errors;
pub mod hasher;
pub mod strength;

pub use argon2::Params;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use strength::validate_strength;
pub use strength::StrengthReport;
