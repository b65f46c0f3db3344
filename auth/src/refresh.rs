use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes behind every refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Secure random source unavailable: {0}")]
    RandomnessUnavailable(String),
}

/// Generate an opaque refresh token.
///
/// 256 bits from the operating system CSPRNG, hex encoded. The token carries
/// no subject, expiry or structure; binding it to a user is up to the caller.
///
/// # Errors
/// * `RandomnessUnavailable` - The OS random source failed
pub fn make_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::RandomnessUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}
