use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

/// Scheme prefix of a bearer credential, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error type for bearer token extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Authorization header not found")]
    MissingHeader,

    #[error("Authorization header is not valid ASCII")]
    InvalidHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MissingScheme,

    #[error("Bearer token is empty")]
    EmptyToken,
}

fn authorization_value(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidHeader)?;

    if value.is_empty() {
        return Err(BearerError::MissingHeader);
    }

    Ok(value)
}

/// Extract the token from an `Authorization` header.
///
/// Strips one leading `"Bearer "` (case-sensitive, single space) and returns
/// the rest verbatim. A value without that prefix is returned unchanged; use
/// [`get_bearer_token_strict`] to reject it instead.
///
/// Unlike a plain prefix strip, a value carrying bytes outside visible ASCII
/// (obs-text, e.g. raw UTF-8) is not passed through: `HeaderValue` only lends
/// such text as bytes, so it fails with `InvalidHeader`. An empty value
/// counts as missing.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header, or an empty one
/// * `InvalidHeader` - Header value is not visible ASCII
pub fn get_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = authorization_value(headers)?;

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
}

/// Extract the token from an `Authorization` header, requiring the bearer
/// scheme.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header, or an empty one
/// * `InvalidHeader` - Header value is not visible ASCII
/// * `MissingScheme` - Value does not start with `"Bearer "`
/// * `EmptyToken` - Nothing follows the scheme
pub fn get_bearer_token_strict(headers: &HeaderMap) -> Result<&str, BearerError> {
    let token = authorization_value(headers)?
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::MissingScheme)?;

    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token)
}
