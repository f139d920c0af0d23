use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for the authentication flow.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first token.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, and password
    ///
    /// # Returns
    /// The stored user and a token for it
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Registration, UserError>;

    /// Check a username and password and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Resolve the user a token was issued for.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed or tampered token
    /// * `ExpiredToken` - Token past its expiry
    /// * `NotFound` - Token subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn resolve_identity(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce username and email uniqueness themselves;
/// the service's pre-checks are best effort.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Nothing is left behind when this fails.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Write back the mutable fields of an existing user (email, password hash,
    /// modified timestamp).
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, user: User) -> Result<User, UserError>;
}
