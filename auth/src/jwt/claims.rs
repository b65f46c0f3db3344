use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::subject::SubjectId;

/// Issuer written into every access token.
pub const ISSUER: &str = "chirpy";

/// Access token claims.
///
/// A flat object with the registered claims `iss`, `iat`, `exp` and `sub`.
/// Timestamps are whole Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (hyphenated UUID)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject issued at `issued_at` and valid for `ttl`.
    ///
    /// Claims hold whole seconds, so `iat` is `issued_at` rounded up and the
    /// ttl is rounded away from zero. A positive ttl therefore never yields a
    /// token that expires before `issued_at + ttl`, and a non-positive one
    /// yields a token that is already expired. `ttl` is not clamped.
    pub fn new(subject: &SubjectId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp() + i64::from(issued_at.timestamp_subsec_nanos() > 0);

        Self {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(whole_seconds(ttl)),
        }
    }

    /// Parse the subject claim.
    ///
    /// # Errors
    /// * `InvalidSubject` - `sub` is not a UUID, or is the nil UUID
    pub fn subject(&self) -> Result<SubjectId, JwtError> {
        let subject = SubjectId::from_string(&self.sub)
            .map_err(|e| JwtError::InvalidSubject(e.to_string()))?;

        if subject.is_nil() {
            return Err(JwtError::InvalidSubject("nil subject".to_string()));
        }

        Ok(subject)
    }

    /// Check if token is expired at `now`.
    ///
    /// Expiry must be strictly after `now`; a token whose `exp` does not
    /// follow its `iat` is always expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= self.iat || i128::from(self.exp) * 1000 <= i128::from(now.timestamp_millis())
    }

    /// Seconds between issuance and expiry.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}

/// Whole seconds of `ttl`, rounded away from zero.
fn whole_seconds(ttl: Duration) -> i64 {
    let seconds = ttl.num_seconds();

    match ttl.subsec_nanos() {
        n if n > 0 => seconds + 1,
        n if n < 0 => seconds - 1,
        _ => seconds,
    }
}
