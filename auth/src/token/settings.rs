use chrono::Duration;
use serde::Deserialize;

use super::errors::TokenError;

/// Minimum signing secret length in bytes (256 bits for HMAC-SHA256).
pub const MIN_SECRET_BYTES: usize = 32;

/// Token issuance and validation settings.
///
/// Loaded once at process start and treated as immutable thereafter.
/// Validation failures here are fatal configuration errors: the process
/// must refuse to serve authenticated routes rather than fail per-request.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_hours: i64,
    pub refresh_expiration_days: i64,
}

impl TokenSettings {
    /// Check the settings for use with HS256 signing.
    ///
    /// # Errors
    /// * `InvalidSettings` - Secret, issuer, or audience is empty, the
    ///   secret is shorter than 256 bits, or a lifetime is not positive
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::InvalidSettings(
                "signing secret is empty".to_string(),
            ));
        }
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::InvalidSettings(format!(
                "signing secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }
        if self.issuer.is_empty() {
            return Err(TokenError::InvalidSettings("issuer is empty".to_string()));
        }
        if self.audience.is_empty() {
            return Err(TokenError::InvalidSettings("audience is empty".to_string()));
        }
        if self.expiration_hours <= 0 {
            return Err(TokenError::InvalidSettings(
                "expiration_hours must be positive".to_string(),
            ));
        }
        if self.refresh_expiration_days <= 0 {
            return Err(TokenError::InvalidSettings(
                "refresh_expiration_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Access-token lifetime.
    pub fn expiration(&self) -> Duration {
        Duration::hours(self.expiration_hours)
    }

    /// Refresh-credential lifetime.
    pub fn refresh_expiration(&self) -> Duration {
        Duration::days(self.refresh_expiration_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> TokenSettings {
        TokenSettings {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            issuer: "todo-service".to_string(),
            audience: "todo-app".to_string(),
            expiration_hours: 24,
            refresh_expiration_days: 7,
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut settings = valid_settings();
        settings.secret = "too_short".to_string();

        assert!(matches!(
            settings.validate(),
            Err(TokenError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_empty_fields_rejected() {
        for field in ["secret", "issuer", "audience"] {
            let mut settings = valid_settings();
            match field {
                "secret" => settings.secret.clear(),
                "issuer" => settings.issuer.clear(),
                _ => settings.audience.clear(),
            }
            assert!(
                matches!(settings.validate(), Err(TokenError::InvalidSettings(_))),
                "empty {} should be rejected",
                field
            );
        }
    }

    #[test]
    fn test_non_positive_lifetimes_rejected() {
        let mut settings = valid_settings();
        settings.expiration_hours = 0;
        assert!(settings.validate().is_err());

        let mut settings = valid_settings();
        settings.refresh_expiration_days = -1;
        assert!(settings.validate().is_err());
    }
}
