use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;
use crate::subject::SubjectId;

/// Access token issuer and validator.
///
/// Uses HS256 (HMAC with SHA-256) with a single symmetric secret. The keys are
/// built once and never change, so a handler can be shared across threads.
/// Anyone holding the secret can mint valid tokens.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue an access token for `subject` valid for `ttl` from now.
    ///
    /// The ttl is trusted as given. Callers enforcing a lifetime ceiling must
    /// clamp it first.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &SubjectId, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    /// Issue an access token with an explicit issuance time.
    pub fn issue_at(
        &self,
        subject: &SubjectId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, issued_at, ttl);
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// # Errors
    /// * `Expired` - `exp` is not strictly in the future
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Malformed` - Framing, algorithm, issuer or claim shape is wrong
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            },
        )?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    /// Validate a token and recover its subject.
    ///
    /// # Errors
    /// * Any `decode` error
    /// * `InvalidSubject` - The `sub` claim is not a UUID, or is the nil UUID
    pub fn validate(&self, token: &str) -> Result<SubjectId, JwtError> {
        self.decode(token)?.subject()
    }
}

/// Issue an access token signed with `secret`.
pub fn make_jwt(subject: &SubjectId, secret: &str, ttl: Duration) -> Result<String, JwtError> {
    JwtHandler::new(secret.as_bytes()).issue(subject, ttl)
}

/// Validate an access token signed with `secret` and return its subject.
pub fn validate_jwt(token: &str, secret: &str) -> Result<SubjectId, JwtError> {
    JwtHandler::new(secret.as_bytes()).validate(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "XKhYOoaAFpN4ofJgIw1QSOk5sTUt/JtlqLgTJ4xQ5+X1jg+2Ojzj6dnpI0+Ukz5l";

    #[test]
    fn test_issue_and_validate() {
        let subject = SubjectId::new();

        let token = make_jwt(&subject, SECRET, Duration::hours(1)).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let decoded = validate_jwt(&token, SECRET).expect("Failed to validate token");
        assert_eq!(decoded, subject);
    }

    #[test]
    fn test_claims_shape() {
        let handler = JwtHandler::new(SECRET.as_bytes());
        let subject = SubjectId::new();

        let token = handler
            .issue(&subject, Duration::minutes(30))
            .expect("Failed to issue token");
        let claims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.lifetime_seconds(), 30 * 60);
    }

    #[test]
    fn test_expired_token() {
        let subject = SubjectId::new();

        let token = make_jwt(&subject, SECRET, Duration::seconds(-1)).expect("Failed to issue token");

        assert_eq!(validate_jwt(&token, SECRET), Err(JwtError::Expired));
    }

    #[test]
    fn test_long_expired_token() {
        let handler = JwtHandler::new(SECRET.as_bytes());
        let issued_at = Utc::now() - Duration::hours(2);

        let token = handler
            .issue_at(&SubjectId::new(), issued_at, Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(handler.validate(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let token = make_jwt(&SubjectId::new(), "secret1", Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(
            validate_jwt(&token, "secret2"),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_invalid_token() {
        let result = validate_jwt("invalid.token.here", SECRET);
        assert!(matches!(result, Err(JwtError::Malformed(_))));

        let result = validate_jwt("", SECRET);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_tampered_claims() {
        let handler = JwtHandler::new(SECRET.as_bytes());
        let token = handler
            .issue(&SubjectId::new(), Duration::hours(1))
            .expect("Failed to issue token");
        let other = handler
            .issue(&SubjectId::new(), Duration::hours(1))
            .expect("Failed to issue token");

        // Splice the claims of one token onto the signature of another.
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(handler.validate(&forged), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_malformed_subject() {
        let handler = JwtHandler::new(SECRET.as_bytes());
        let mut claims = Claims::new(&SubjectId::new(), Utc::now(), Duration::hours(1));
        claims.sub = "user123".to_string();

        let token = handler.encode(&claims).expect("Failed to encode token");

        assert!(matches!(
            handler.validate(&token),
            Err(JwtError::InvalidSubject(_))
        ));
        // The claims themselves are still well-formed.
        assert!(handler.decode(&token).is_ok());
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let handler = JwtHandler::new(SECRET.as_bytes());
        let mut claims = Claims::new(&SubjectId::new(), Utc::now(), Duration::hours(1));
        claims.iss = "someone-else".to_string();

        let token = handler.encode(&claims).expect("Failed to encode token");

        assert!(matches!(handler.validate(&token), Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = Claims::new(&SubjectId::new(), Utc::now(), Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode token");

        assert!(matches!(
            validate_jwt(&token, SECRET),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_sub_second_ttl_validates_immediately() {
        let subject = SubjectId::new();

        let token = make_jwt(&subject, SECRET, Duration::milliseconds(900))
            .expect("Failed to issue token");

        assert_eq!(validate_jwt(&token, SECRET), Ok(subject));
    }

    #[test]
    fn test_nil_subject_rejected() {
        let token = make_jwt(&SubjectId(uuid::Uuid::nil()), SECRET, Duration::hours(1))
            .expect("Failed to issue token");

        assert!(matches!(
            validate_jwt(&token, SECRET),
            Err(JwtError::InvalidSubject(_))
        ));
    }
}
