//! Authentication utilities library
//!
//! Provides the credential primitives used by the API service:
//! - Password hashing (Argon2id, fresh salt per hash)
//! - Stateless signed tokens with expiry (HS256 JWT)
//! - Authentication coordination
//!
//! Nothing here performs I/O. Token verification is pure computation over the
//! token and the configured secret; there is no per-token server state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenRejection};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = codec.issue("user123", 3600).unwrap();
//! assert_eq!(codec.verify(&token), Ok("user123".to_string()));
//!
//! let expired = codec.issue("user123", 0).unwrap();
//! assert_eq!(codec.verify(&expired), Err(TokenRejection::Expired));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::with_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let token = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let subject = auth.validate_token(&token).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenRejection;
pub use jwt::DEFAULT_TOKEN_TTL_SECONDS;
pub use password::PasswordError;
pub use password::PasswordHasher;
