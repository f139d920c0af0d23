use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered user. The plaintext password is never held here,
/// only its Argon2 PHC string.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Surrounding whitespace is stripped; the remainder must be non-empty and
/// fit the 32 character storage column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `UsernameMissing` - Empty after trimming
    /// * `UsernameTooLong` - Longer than 32 characters
    pub fn new(username: &str) -> Result<Self, ValidationError> {
        let username = username.trim();

        if username.is_empty() {
            return Err(ValidationError::UsernameMissing);
        }

        if username.chars().count() > Self::MAX_LENGTH {
            return Err(ValidationError::UsernameTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(username.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Only the bare `local@domain.tld` form is accepted: no display name, no
/// quoted local part, no bracketed domain literal. The domain is stored
/// lowercased so one mailbox has one spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub const MAX_LENGTH: usize = 120;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `EmailMissing` - Empty after trimming
    /// * `EmailTooLong` - Longer than 120 characters
    /// * `EmailInvalid` - Not shaped like `local@domain.tld`
    pub fn new(email: &str) -> Result<Self, ValidationError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(ValidationError::EmailMissing);
        }

        if email.chars().count() > Self::MAX_LENGTH {
            return Err(ValidationError::EmailTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let parsed = email_address::EmailAddress::from_str(email)
            .map_err(|_| ValidationError::EmailInvalid)?;

        if !parsed.display_part().is_empty()
            || parsed.email() != email
            || parsed.local_part().starts_with('"')
            || parsed.domain().starts_with('[')
            || !Self::has_dotted_domain(parsed.domain())
        {
            return Err(ValidationError::EmailInvalid);
        }

        Ok(Self(format!(
            "{}@{}",
            parsed.local_part(),
            parsed.domain().to_ascii_lowercase()
        )))
    }

    fn has_dotted_domain(domain: &str) -> bool {
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user, built by the credential validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    /// Trimmed plaintext password (hashed by the service)
    pub password: String,
}

/// Command to log in with a username and password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub token: String,
}
