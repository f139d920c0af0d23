use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenRejection;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator from its parts.
    pub fn new(password_hasher: PasswordHasher, token_codec: TokenCodec) -> Self {
        Self {
            password_hasher,
            token_codec,
        }
    }

    /// Create an authenticator with default hashing cost and token lifetime.
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    pub fn with_secret(secret: &[u8]) -> Result<Self, TokenError> {
        Ok(Self::new(PasswordHasher::new(), TokenCodec::new(secret)?))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Whether a stored hash should be replaced with one made under current settings.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        self.password_hasher.needs_rehash(stored_hash)
    }

    /// Verify a password and, on success, issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed internally
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue_default(subject)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, where the caller has just set the password.
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_codec.issue_default(subject)
    }

    /// Verify a token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<String, TokenRejection> {
        self.token_codec.verify(token)
    }
}
