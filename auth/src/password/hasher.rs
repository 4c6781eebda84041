use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id) with a
/// configurable work factor. The emitted PHC string embeds the algorithm,
/// version, parameters, and salt, so a stored hash can be inspected for
/// rehash-need without any external state.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the recommended default work factor.
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// Raising the parameters later is safe: stored hashes keep verifying
    /// under their embedded parameters and report [`needs_rehash`] as true.
    ///
    /// [`needs_rehash`]: PasswordHasher::needs_rehash
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn context(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated per call, so hashing the same
    /// password twice yields two different outputs.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }

        let salt = SaltString::generate(&mut OsRng);

        self.context()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Fail-closed: an empty password, an empty or malformed stored hash,
    /// and any internal hashing error all report `false`. Verification uses
    /// the parameters embedded in the stored hash, so hashes produced under
    /// an older work factor keep verifying.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if password.is_empty() || hash.is_empty() {
            return false;
        }

        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        self.context()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Report whether a stored hash should be recomputed.
    ///
    /// True when the embedded algorithm or parameters differ from this
    /// hasher's configuration. Unparseable input also reports true, so a
    /// corrupt stored hash heals itself on the next successful login.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return true,
        };

        if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
            return true;
        }

        let params = match Params::try_from(&parsed) {
            Ok(params) => params,
            Err(_) => return true,
        };

        params.m_cost() != self.params.m_cost()
            || params.t_cost() != self.params.t_cost()
            || params.p_cost() != self.params.p_cost()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let first = hasher.hash(password).expect("Failed to hash password");
        let second = hasher.hash(password).expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify(password, &first));
        assert!(hasher.verify(password, &second));
    }

    #[test]
    fn test_hash_empty_password() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.hash(""), Err(PasswordError::Empty));
    }

    #[test]
    fn test_verify_is_fail_closed() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "not_a_phc_string"));
        assert!(!hasher.verify("", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_needs_rehash_fresh_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").expect("Failed to hash password");

        assert!(!hasher.needs_rehash(&hash));
    }

    #[test]
    fn test_needs_rehash_after_raising_work_factor() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").expect("Failed to hash password");

        let stronger = PasswordHasher::with_params(
            Params::new(32768, 3, 1, None).expect("Failed to build params"),
        );

        assert!(stronger.needs_rehash(&hash));
        // The old hash still verifies under its embedded parameters.
        assert!(stronger.verify("password", &hash));
    }

    #[test]
    fn test_needs_rehash_unparseable_hash() {
        let hasher = PasswordHasher::new();

        assert!(hasher.needs_rehash(""));
        assert!(hasher.needs_rehash("not_a_phc_string"));
    }
}
