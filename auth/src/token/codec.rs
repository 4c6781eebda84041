use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use base64::engine::general_purpose;
use base64::Engine as _;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::TokenError;
use super::settings::TokenSettings;

/// Token issued for an authenticated identity.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Builds and parses signed, time-bound identity tokens.
///
/// Signing is symmetric HMAC-SHA256 only. Construction validates the
/// settings, so an invalid configuration fails at startup rather than on
/// the first request. Validation and issuance are pure and side-effect
/// free; a codec can be shared across tasks without synchronization.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    settings: TokenSettings,
}

impl TokenCodec {
    /// Create a codec from validated settings.
    ///
    /// # Errors
    /// * `InvalidSettings` - Settings fail [`TokenSettings::validate`]
    pub fn new(settings: &TokenSettings) -> Result<Self, TokenError> {
        settings.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        // Zero clock-skew tolerance: expiry is exact.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            settings: settings.clone(),
        })
    }

    /// Issue a signed token for an identity.
    ///
    /// Claims carry the subject id, username, email, a fresh unique token
    /// id, and issued-at/expiry timestamps derived from the settings.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        user_id: impl ToString,
        username: &str,
        email: &str,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + self.settings.expiration();

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
        };

        Ok(IssuedToken {
            token: self.encode(&claims)?,
            expires_at,
        })
    }

    /// Encode an explicit claims set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// Checks, in order: signature integrity, issuer equality, audience
    /// equality, and expiry (strict future, zero leeway). Every failure
    /// collapses to the uniform `Invalid` outcome.
    ///
    /// # Errors
    /// * `Invalid` - Any validation check failed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }

    /// Validate a token and project its subject id.
    ///
    /// Returns `None` for any invalid token.
    pub fn extract_user_id(&self, token: &str) -> Option<String> {
        self.validate(token).ok().map(|claims| claims.sub)
    }
}

/// Read a token's expiry via structural parse only, without the signing
/// secret.
///
/// Returns `None` for malformed input. The claims are NOT authenticated;
/// never use this for a trust decision.
pub fn expiration_time(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp, 0)
}

/// Whether a token is past its embedded expiry, judged without the signing
/// secret. Malformed input counts as expired. Advisory use only.
pub fn is_expired(token: &str) -> bool {
    match expiration_time(token) {
        Some(expires_at) => expires_at.timestamp() <= Utc::now().timestamp(),
        None => true,
    }
}

/// Generate a random high-entropy refresh credential.
///
/// 64 bytes from the OS CSPRNG, base64-encoded. The credential is opaque
/// and carries no claims; binding and persistence are the caller's concern.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 64];
    OsRng.fill_bytes(&mut bytes);
    general_purpose::STANDARD.encode(bytes)
}
