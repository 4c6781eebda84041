use serde::Deserialize;
use serde::Serialize;

/// Claims embedded in an issued token.
///
/// The claim set is fixed: subject id, username, email, a unique token id,
/// issued-at and expiry timestamps, issuer, and audience. A token is fully
/// reconstructable from itself plus the shared signing secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    pub username: String,

    pub email: String,

    /// JWT ID (unique per issued token)
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Whether the token is expired at the given Unix timestamp.
    ///
    /// The boundary is exact: a token is valid strictly before its expiry,
    /// with no grace window.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_expiring_at(exp: i64) -> Claims {
        Claims {
            sub: "user123".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            jti: "token-1".to_string(),
            iat: exp - 3600,
            exp,
            iss: "todo-service".to_string(),
            aud: "todo-app".to_string(),
        }
    }

    #[test]
    fn test_expiry_boundary_is_exact() {
        let claims = claims_expiring_at(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }
}
