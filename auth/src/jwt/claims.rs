use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Token payload.
///
/// Registered RFC 7519 claims only: the subject and the issue/expiry instants
/// as Unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, issued now and expiring after `ttl_seconds`.
    pub fn for_subject(subject: impl ToString, ttl_seconds: u64) -> Self {
        Self::issued_at(subject, Utc::now().timestamp(), ttl_seconds)
    }

    /// Create claims for a subject issued at an explicit instant.
    pub fn issued_at(subject: impl ToString, issued_at: i64, ttl_seconds: u64) -> Self {
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl),
        }
    }

    /// Check if token is expired.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
