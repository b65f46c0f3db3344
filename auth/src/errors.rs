use http::StatusCode;
use thiserror::Error;

use crate::authenticator::AuthenticationError;
use crate::bearer::BearerError;
use crate::config::ConfigurationError;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::refresh::RefreshTokenError;

/// Umbrella error for the credential and token subsystem.
///
/// `Display` carries the internal detail for operator logs. Responses to API
/// clients must use [`AuthError::status_code`] and [`AuthError::public_message`],
/// which never reveal why a credential or token was rejected.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Incorrect email or password")]
    Authentication,

    #[error("Invalid token: {0}")]
    InvalidToken(JwtError),

    #[error("Authorization header rejected: {0}")]
    MissingHeader(BearerError),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Randomness unavailable: {0}")]
    Randomness(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status the handler layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Authentication | AuthError::InvalidToken(_) | AuthError::MissingHeader(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Configuration(_)
            | AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::Randomness(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic, non-revealing message for API clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::Authentication => "Incorrect email or password",
            AuthError::InvalidToken(_) => "Invalid or expired token",
            AuthError::MissingHeader(_) => "Missing or invalid Authorization header",
            _ => "Internal server error",
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthError::Authentication,
            PasswordError::HashingFailed(msg) | PasswordError::InvalidParameters(msg) => {
                AuthError::Hashing(msg)
            }
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => AuthError::Signing(msg),
            other => AuthError::InvalidToken(other),
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        AuthError::MissingHeader(err)
    }
}

impl From<RefreshTokenError> for AuthError {
    fn from(err: RefreshTokenError) -> Self {
        AuthError::Randomness(err.to_string())
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::Authentication,
            AuthenticationError::PasswordError(e) => e.into(),
            AuthenticationError::JwtError(e) => e.into(),
            AuthenticationError::RefreshTokenError(e) => e.into(),
            AuthenticationError::CredentialStore(e) => AuthError::Internal(e.to_string()),
        }
    }
}
