use thiserror::Error;

/// Error type for password operations.
///
/// Verification has a single failure variant: a malformed stored hash and a
/// wrong password are indistinguishable to the caller.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),

    #[error("Password does not match")]
    Mismatch,
}
