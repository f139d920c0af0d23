//! Credential shape rules, applied before any state is touched.
//!
//! Every value is trimmed before it is checked, and the first rule that fails
//! is the one reported.

use crate::domain::user::errors::ValidationError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate registration input.
///
/// Order: username, password presence, password length, email presence,
/// email shape.
pub fn validate_registration(
    username: Option<&str>,
    password: Option<&str>,
    email: Option<&str>,
) -> Result<RegisterUserCommand, ValidationError> {
    let username = Username::new(username.unwrap_or_default())?;

    let password = required_password(password)?;
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    let email = EmailAddress::new(email.unwrap_or_default())?;

    Ok(RegisterUserCommand {
        username,
        email,
        password,
    })
}

/// Validate login input: both fields present and non-blank.
pub fn validate_login(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<LoginCommand, ValidationError> {
    let username = username.map(str::trim).unwrap_or_default();
    if username.is_empty() {
        return Err(ValidationError::UsernameMissing);
    }

    let password = required_password(password)?;

    Ok(LoginCommand {
        username: username.to_string(),
        password,
    })
}

fn required_password(password: Option<&str>) -> Result<String, ValidationError> {
    match password.map(str::trim) {
        Some(password) if !password.is_empty() => Ok(password.to_string()),
        _ => Err(ValidationError::PasswordMissing),
    }
}
