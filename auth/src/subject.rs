use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Error for SubjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubjectIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Unique identifier of an authenticated principal.
///
/// Carried in the `sub` claim of access tokens as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    /// Generate a new random subject ID.
    ///
    /// # Returns
    /// SubjectId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether this is the all-zero UUID, which never names a principal.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Parse a subject ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed SubjectId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SubjectIdError> {
        Uuid::parse_str(s)
            .map(SubjectId)
            .map_err(|e| SubjectIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SubjectId {
    type Err = SubjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl From<Uuid> for SubjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let id = SubjectId::new();
        let parsed = SubjectId::from_string(&id.to_string()).expect("Failed to parse subject");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_invalid() {
        let result = "not-a-uuid".parse::<SubjectId>();
        assert!(matches!(result, Err(SubjectIdError::InvalidFormat(_))));
    }

    #[test]
    fn test_nil() {
        let nil: SubjectId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("Failed to parse subject");

        assert!(nil.is_nil());
        assert_eq!(nil, SubjectId::from(Uuid::nil()));
        assert!(!SubjectId::new().is_nil());
    }
}
