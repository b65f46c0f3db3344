use chrono::Duration;
use http::HeaderMap;

use crate::bearer::get_bearer_token;
use crate::config::AuthConfig;
use crate::config::ConfigurationError;
use crate::credentials::CredentialStore;
use crate::credentials::CredentialStoreError;
use crate::errors::AuthError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::make_refresh_token;
use crate::refresh::RefreshTokenError;
use crate::subject::SubjectId;

// Plaintext behind the hash verified for unknown emails.
const DUMMY_PASSWORD: &str = "chirpy-unknown-account";

/// Authentication coordinator combining password verification, access token
/// issuance and refresh token generation.
///
/// Built once from [`AuthConfig`] and shared (e.g. behind an `Arc`) by every
/// request handler. Holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    default_ttl: Duration,
    max_ttl: Duration,
    // Verified on unknown-email logins so they cost the same Argon2 work as
    // a wrong password.
    dummy_hash: String,
}

/// Tokens minted for a verified password.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Opaque refresh token
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub subject_id: SubjectId,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Refresh token error: {0}")]
    RefreshTokenError(#[from] RefreshTokenError),

    #[error("Credential lookup failed: {0}")]
    CredentialStore(#[from] CredentialStoreError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Validated configuration holding the signing secret, token
    ///   lifetimes and password hashing cost
    ///
    /// # Errors
    /// * `MissingSecret` / `Invalid` - Configuration is unusable
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let password_hasher = PasswordHasher::with_params(
            config.password.memory_kib,
            config.password.iterations,
            config.password.parallelism,
        )
        .map_err(|e| ConfigurationError::Invalid(e.to_string()))?;

        let dummy_hash = password_hasher
            .hash(DUMMY_PASSWORD)
            .map_err(|e| ConfigurationError::Invalid(e.to_string()))?;

        // Both lifetimes are bounded by `validate`, well inside `Duration`.
        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(config.jwt.secret.as_bytes()),
            default_ttl: Duration::seconds(config.jwt.default_expiration_seconds),
            max_ttl: Duration::seconds(config.jwt.max_expiration_seconds),
            dummy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password is wrong or the hash is unusable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Access token lifetime for a requested number of seconds.
    ///
    /// Missing or non-positive requests get the configured default; anything
    /// above the configured ceiling is cut down to it. Clamping happens on the
    /// raw seconds, so any `i64` is accepted.
    pub fn effective_ttl(&self, requested_seconds: Option<i64>) -> Duration {
        match requested_seconds {
            Some(seconds) if seconds > 0 => {
                Duration::seconds(seconds.min(self.max_ttl.num_seconds()))
            }
            _ => self.default_ttl.min(self.max_ttl),
        }
    }

    /// Verify credentials and mint an access and a refresh token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the access token asserts
    /// * `requested_seconds` - Requested access token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    /// * `RefreshTokenError` - Refresh token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &SubjectId,
        requested_seconds: Option<i64>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_password(password, stored_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
                other => AuthenticationError::PasswordError(other),
            })?;

        let ttl = self.effective_ttl(requested_seconds);
        let access_token = self.jwt_handler.issue(subject, ttl)?;
        let refresh_token = make_refresh_token()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
            expires_in: ttl.num_seconds(),
        })
    }

    /// Log a user in by email and password.
    ///
    /// An unknown email and a wrong password both fail with
    /// `InvalidCredentials`, and both pay for one Argon2 verification: an
    /// unknown email is checked against a hash computed at construction.
    ///
    /// # Arguments
    /// * `store` - Credential lookup
    /// * `email` - Email address supplied by the client
    /// * `password` - Plaintext password supplied by the client
    /// * `expires_in_seconds` - Requested access token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user, or wrong password
    /// * `CredentialStore` - Lookup failed
    /// * `JwtError` / `RefreshTokenError` - Token generation failed
    pub async fn login<S>(
        &self,
        store: &S,
        email: &str,
        password: &str,
        expires_in_seconds: Option<i64>,
    ) -> Result<LoginResult, AuthenticationError>
    where
        S: CredentialStore + ?Sized,
    {
        let credential = match store.find_by_email(email).await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                let _ = self.verify_password(password, &self.dummy_hash);
                tracing::warn!(reason = "unknown_email", "Login rejected");
                return Err(AuthenticationError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "Credential lookup failed");
                return Err(e.into());
            }
        };

        let tokens = self
            .authenticate(
                password,
                &credential.hashed_password,
                &credential.subject_id,
                expires_in_seconds,
            )
            .map_err(|e| {
                match &e {
                    AuthenticationError::InvalidCredentials => tracing::warn!(
                        subject_id = %credential.subject_id,
                        reason = "wrong_password",
                        "Login rejected"
                    ),
                    other => tracing::error!(
                        subject_id = %credential.subject_id,
                        error = %other,
                        "Token issuance failed"
                    ),
                }
                e
            })?;

        tracing::info!(
            subject_id = %credential.subject_id,
            expires_in = tokens.expires_in,
            "Login succeeded"
        );

        Ok(LoginResult {
            subject_id: credential.subject_id,
            email: credential.email,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        })
    }

    /// Issue an access token without password verification.
    ///
    /// For callers that have already authenticated the subject by other
    /// means. The requested lifetime is clamped like a login.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access_token(
        &self,
        subject: &SubjectId,
        requested_seconds: Option<i64>,
    ) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(subject, self.effective_ttl(requested_seconds))
    }

    /// Validate an access token and recover its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed
    pub fn validate_token(&self, token: &str) -> Result<SubjectId, JwtError> {
        self.jwt_handler.validate(token)
    }

    /// Resolve the subject of a request from its `Authorization` header.
    ///
    /// # Errors
    /// * `MissingHeader` - No usable `Authorization` header
    /// * `InvalidToken` - Token validation failed
    pub fn authenticate_request(&self, headers: &HeaderMap) -> Result<SubjectId, AuthError> {
        let token = get_bearer_token(headers).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token extraction failed");
            AuthError::from(e)
        })?;

        self.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "JWT validation failed");
            AuthError::from(e)
        })
    }
}
