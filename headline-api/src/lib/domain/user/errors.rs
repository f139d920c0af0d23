use auth::PasswordError;
use auth::TokenError;
use auth::TokenRejection;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Input that fails the credential rules.
///
/// Messages are returned to the client verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username is required")]
    UsernameMissing,

    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },

    #[error("password is required")]
    PasswordMissing,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("email is required")]
    EmailMissing,

    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },

    #[error("email address is not valid")]
    EmailInvalid,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Conflicts
    #[error("username already exists")]
    UsernameAlreadyExists(String),

    #[error("email already exists")]
    EmailAlreadyExists(String),

    // Authentication
    #[error("credentials did not match")]
    InvalidCredentials,

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TokenRejection> for UserError {
    fn from(rejection: TokenRejection) -> Self {
        match rejection {
            TokenRejection::Invalid => UserError::InvalidToken,
            TokenRejection::Expired => UserError::ExpiredToken,
        }
    }
}
