use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation failures keep their cause for logging and branching; the
/// message shown to API clients is the same for all of them (see
/// `AuthError::public_message`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token subject is invalid: {0}")]
    InvalidSubject(String),
}

