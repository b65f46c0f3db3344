use async_trait::async_trait;
use thiserror::Error;

use crate::subject::SubjectId;

/// Stored login credential of a user.
///
/// Owned by the user-record store; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub subject_id: SubjectId,
    pub email: String,
    pub hashed_password: String,
}

/// Error for credential lookups.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of credentials by email, implemented by the user-record store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Retrieve the credential registered for an email address.
    ///
    /// # Arguments
    /// * `email` - Email address as supplied at login
    ///
    /// # Returns
    /// Optional credential (None if no user has this email)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be queried
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, CredentialStoreError>;
}
