//! Credential and session-token library for the chirpy backend
//!
//! Provides the security-sensitive pieces the HTTP layer builds on:
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (HS256 JWT)
//! - Opaque refresh token generation
//! - Bearer token extraction from request headers
//! - Login coordination over a pluggable credential store
//!
//! Everything here is stateless apart from read-only configuration, so a
//! single [`Authenticator`] can be shared by all request handlers.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use chirpy_auth::{check_password_hash, hash_password};
//!
//! let hash = hash_password("my_password").unwrap();
//! assert!(check_password_hash("my_password", &hash).is_ok());
//! assert!(check_password_hash("not_my_password", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use chirpy_auth::{make_jwt, validate_jwt, SubjectId};
//! use chrono::Duration;
//!
//! let subject = SubjectId::new();
//! let token = make_jwt(&subject, "secret_key", Duration::hours(1)).unwrap();
//! assert_eq!(validate_jwt(&token, "secret_key").unwrap(), subject);
//! ```
//!
//! ## Bearer Extraction
//! ```
//! use chirpy_auth::get_bearer_token;
//! use http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
//! assert_eq!(get_bearer_token(&headers).unwrap(), "abc123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use chirpy_auth::{AuthConfig, Authenticator, SubjectId};
//!
//! let auth = Authenticator::new(&AuthConfig::from_secret("secret_key")).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint tokens
//! let subject = SubjectId::new();
//! let result = auth.authenticate("password123", &hash, &subject, Some(7200)).unwrap();
//! assert_eq!(result.expires_in, 3600);
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), subject);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod subject;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::LoginResult;
pub use bearer::get_bearer_token;
pub use bearer::get_bearer_token_strict;
pub use bearer::BearerError;
pub use self::config::AuthConfig;
pub use self::config::ConfigurationError;
pub use credentials::Credential;
pub use credentials::CredentialStore;
pub use credentials::CredentialStoreError;
pub use errors::AuthError;
pub use jwt::make_jwt;
pub use jwt::validate_jwt;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::check_password_hash;
pub use password::hash_password;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::make_refresh_token;
pub use refresh::RefreshTokenError;
pub use subject::SubjectId;
