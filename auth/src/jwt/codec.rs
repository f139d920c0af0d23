use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::errors::TokenRejection;

/// Lifetime of a token when the caller does not pick one (10 hours).
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 36_000;

/// Stateless token codec.
///
/// Issues HS256-signed JWTs carrying a subject and an absolute expiry, and
/// verifies them without any server-side lookup. Nothing is stored per token,
/// so a token stays valid until it expires; changing the secret invalidates
/// every token issued under the old one.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    default_ttl_seconds: u64,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// TokenCodec configured with HS256 and the 10 hour default lifetime
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let algorithm = Algorithm::HS256;

        // Expiry is checked by `verify_at` so the boundary is exact and the
        // clock can be supplied by the caller.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            default_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        })
    }

    /// Override the lifetime used by [`TokenCodec::issue_default`].
    pub fn with_default_ttl(mut self, ttl_seconds: u64) -> Self {
        self.default_ttl_seconds = ttl_seconds;
        self
    }

    pub fn default_ttl_seconds(&self) -> u64 {
        self.default_ttl_seconds
    }

    /// Issue a token for `subject` that expires `ttl_seconds` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl_seconds: u64) -> Result<String, TokenError> {
        self.encode(&Claims::for_subject(subject, ttl_seconds))
    }

    /// Issue a token with the configured default lifetime.
    pub fn issue_default(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, self.default_ttl_seconds)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Returns
    /// The subject the token was issued for
    ///
    /// # Errors
    /// * `Invalid` - Malformed token or signature mismatch
    /// * `Expired` - Valid signature, but the expiry instant has passed
    pub fn verify(&self, token: &str) -> Result<String, TokenRejection> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now` (Unix seconds).
    ///
    /// Signature and structure are checked before expiry, so a tampered
    /// token is always `Invalid` even when it is also past its expiry.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<String, TokenRejection> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| TokenRejection::Invalid)?;

        if claims.sub.is_empty() {
            return Err(TokenRejection::Invalid);
        }

        if claims.is_expired(now) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims.sub)
    }
}
