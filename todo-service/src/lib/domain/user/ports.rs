use async_trait::async_trait;

use crate::domain::errors::AppError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for credential service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and open a session.
    ///
    /// # Errors
    /// * `Conflict` - Email or username is already bound
    /// * `Validation` - Password fails the strength policy
    /// * `Unclassified` - Storage or hashing failure
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, AppError>;

    /// Authenticate by email and password and open a session.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown account or wrong password; the two are
    ///   deliberately indistinguishable in the returned failure
    /// * `Unclassified` - Storage or hashing failure
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AppError>;

    /// Retrieve a user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Unclassified` - Storage failure
    async fn get_by_id(&self, id: &UserId) -> Result<User, AppError>;
}

/// Persistence operations for the credential record.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// The storage uniqueness constraints on username and email are
    /// authoritative; a violation surfaces as `Conflict`.
    ///
    /// # Errors
    /// * `Conflict` - Username or email is already bound
    /// * `Unclassified` - Storage failure
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// Retrieve a user by identifier, `None` if absent.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError>;

    /// Retrieve a user by username, `None` if absent.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AppError>;

    /// Retrieve a user by email address, `None` if absent.
    ///
    /// # Errors
    /// * `Unclassified` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Replace a user's stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Unclassified` - Storage failure
    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), AppError>;
}
