use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;

use crate::domain::errors::AppError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// External failure message for both unknown accounts and wrong passwords.
/// Merging the two is an anti-enumeration measure, not an oversight.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Well-formed hash of no password in particular. Verified against when a
/// login names an unknown account, so that path costs the same as a wrong
/// password against a real account.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$QUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUE";

/// Credential service: registration, login, and token issuance.
///
/// Holds no mutable state; durable state lives behind the repository port
/// and the token settings are immutable after startup.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    hasher: PasswordHasher,
    codec: Arc<TokenCodec>,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self {
            repository,
            hasher: PasswordHasher::new(),
            codec,
        }
    }

    /// Hash on the blocking pool so one registration never stalls
    /// unrelated requests behind a password hash.
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::unclassified("Password hashing task failed").with_source(e))?
            .map_err(AppError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::unclassified("Password verification task failed").with_source(e))
    }

    /// Rewrite the stored hash when the work factor has moved on.
    ///
    /// Best-effort: any failure is logged and the surrounding login still
    /// succeeds. Concurrent logins may race here; every racer converges to
    /// an equivalent hash, so last-write-wins is acceptable.
    async fn rehash_if_needed(&self, mut user: User, password: &str) -> User {
        if !self.hasher.needs_rehash(&user.password_hash) {
            return user;
        }

        match self.hash_password(password.to_string()).await {
            Ok(new_hash) => match self
                .repository
                .update_password_hash(&user.id, &new_hash)
                .await
            {
                Ok(()) => {
                    tracing::info!(user_id = %user.id, "Password hash upgraded on login");
                    user.password_hash = new_hash;
                }
                Err(e) => {
                    tracing::warn!(user_id = %user.id, error = %e, "Failed to persist rehashed password");
                }
            },
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to rehash password");
            }
        }

        user
    }

    fn open_session(&self, user: User) -> Result<AuthSession, AppError> {
        let issued = self
            .codec
            .issue(user.id, user.username.as_str(), user.email.as_str())?;

        Ok(AuthSession {
            access_token: issued.token,
            refresh_token: auth::token::generate_refresh_token(),
            expires_at: issued.expires_at,
            user,
        })
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, AppError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email is already in use"));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username is already in use"));
        }

        let report = auth::validate_strength(&command.password);
        if !report.is_valid() {
            return Err(
                AppError::validation("Password validation failed").with_details(report.errors)
            );
        }
        if report.has_warnings() {
            tracing::debug!(warnings = ?report.warnings, "Password accepted with advisory warnings");
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // A concurrent registration can still slip between the checks above
        // and this insert; the storage uniqueness constraints are
        // authoritative and the violation surfaces as the same Conflict.
        let user = self.repository.create(user).await?;

        self.open_session(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AppError> {
        let user = self.repository.find_by_email(&command.email).await?;

        let Some(user) = user else {
            let _ = self
                .verify_password(command.password, DUMMY_HASH.to_string())
                .await;
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let password_matches = self
            .verify_password(command.password.clone(), user.password_hash.clone())
            .await?;
        if !password_matches {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = self.rehash_if_needed(user, &command.password).await;

        self.open_session(user)
    }

    async fn get_by_id(&self, id: &UserId) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{}' was not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenSettings;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::errors::ErrorKind;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, AppError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AppError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
            async fn update_password_hash(&self, id: &UserId, password_hash: &str) -> Result<(), AppError>;
        }
    }

    fn codec() -> Arc<TokenCodec> {
        let settings = TokenSettings {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            issuer: "todo-service".to_string(),
            audience: "todo-app".to_string(),
            expiration_hours: 24,
            refresh_expiration_days: 7,
        };
        Arc::new(TokenCodec::new(&settings).expect("Failed to create codec"))
    }

    fn service(repository: MockTestUserRepository) -> AuthService<MockTestUserRepository> {
        AuthService::new(Arc::new(repository), codec())
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "Secret1!".to_string(),
        )
    }

    fn stored_user(password_hash: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice" && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);
        let session = service.register(register_command()).await.unwrap();

        assert_eq!(session.user.username.as_str(), "alice");
        assert!(!session.refresh_token.is_empty());

        // The issued token decodes back to the registered identity.
        let claims = codec().validate(&session.access_token).unwrap();
        assert_eq!(claims.sub, session.user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp, session.expires_at.timestamp());
    }

    #[tokio::test]
    async fn test_register_email_already_in_use() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("$argon2id$stored"))));
        repository.expect_find_by_username().times(0);
        repository.expect_create().times(0);

        let service = service(repository);
        let error = service.register(register_command()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Conflict);
        assert_eq!(error.message, "Email is already in use");
    }

    #[tokio::test]
    async fn test_register_username_already_in_use() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("$argon2id$stored"))));
        repository.expect_create().times(0);

        let service = service(repository);
        let error = service.register(register_command()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Conflict);
        assert_eq!(error.message, "Username is already in use");
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(0);

        let service = service(repository);
        let mut command = register_command();
        command.password = "abc".to_string();

        let error = service.register(command).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Validation);
        assert!(error.details[0].contains("at least 6 characters"));
    }

    #[tokio::test]
    async fn test_register_insert_race_collapses_to_conflict() {
        let mut repository = MockTestUserRepository::new();

        // Both pre-checks pass, then a concurrent registration wins the
        // insert and the unique constraint fires.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Email is already in use")));

        let service = service(repository);
        let error = service.register(register_command()).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_login_success() {
        let hash = PasswordHasher::new().hash("Secret1!").unwrap();
        let user = stored_user(&hash);
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository.expect_update_password_hash().times(0);

        let service = service(repository);
        let session = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Secret1!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.user.id, user_id);
        let claims = codec().validate(&session.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let hash = PasswordHasher::new().hash("Secret1!").unwrap();
        let user = stored_user(&hash);

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_find_by_email()
            .withf(|email| email == "nobody@example.com")
            .returning(|_| Ok(None));

        let service = service(repository);

        let wrong_password = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "WrongPassword1!".to_string(),
            })
            .await
            .unwrap_err();

        let unknown_email = service
            .login(LoginCommand {
                email: "nobody@example.com".to_string(),
                password: "Secret1!".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::Unauthorized);
        assert_eq!(unknown_email.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn test_login_rehashes_outdated_hash() {
        // Hash stored under a different work factor than the current one.
        let old_hasher = PasswordHasher::with_params(
            auth::password::Params::new(19456, 3, 1, None).expect("Failed to build params"),
        );
        let hash = old_hasher.hash("Secret1!").unwrap();
        let user = stored_user(&hash);
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update_password_hash()
            .withf(move |id, new_hash| *id == user_id && new_hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository);
        let session = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Secret1!".to_string(),
            })
            .await
            .unwrap();

        // The session carries the upgraded hash.
        assert_ne!(session.user.password_hash, hash);
    }

    #[tokio::test]
    async fn test_login_succeeds_when_rehash_write_fails() {
        let old_hasher = PasswordHasher::with_params(
            auth::password::Params::new(19456, 3, 1, None).expect("Failed to build params"),
        );
        let hash = old_hasher.hash("Secret1!").unwrap();
        let user = stored_user(&hash);

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_update_password_hash()
            .times(1)
            .returning(|_, _| Err(AppError::unclassified("Database operation failed")));

        let service = service(repository);
        let result = service
            .login(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Secret1!".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let user = stored_user("$argon2id$stored");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository);
        let found = service.get_by_id(&user_id).await.unwrap();
        assert_eq!(found.id, user_id);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);
        let error = service.get_by_id(&UserId::new()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }
}
