use thiserror::Error;

/// Error type for token issuance and codec construction.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token signing secret is missing or empty")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Outcome of a token that could not be accepted.
///
/// Returned by value from verification; callers decide how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// Malformed structure, unexpected algorithm, or signature mismatch.
    #[error("Token is invalid")]
    Invalid,

    /// Signature is valid but the expiry instant has passed.
    #[error("Token is expired")]
    Expired,
}
