use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Token issuer and verifier.
///
/// Signs claims with a process-wide symmetric key (HS256) and a fixed
/// lifetime. Verification is self-contained: signature and expiry are
/// checked from the token alone, with zero leeway so the expiry
/// boundary is exact. No external lookup happens here.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime_hours: i64,
}

impl TokenHandler {
    /// Create a token handler from the signing secret and token lifetime.
    ///
    /// The secret should be at least 256 bits (32 bytes) for HS256 and
    /// come from configuration, never from user input.
    pub fn new(secret: &[u8], lifetime_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime_hours,
        }
    }

    /// Configured token lifetime in hours.
    pub fn lifetime_hours(&self) -> i64 {
        self.lifetime_hours
    }

    /// Issue a signed token for a principal.
    ///
    /// # Arguments
    /// * `id` - Principal's numeric id
    /// * `username` - Principal's username
    /// * `email` - Principal's email
    ///
    /// # Returns
    /// Compact token string (three dot-separated base64url segments)
    ///
    /// # Errors
    /// * `Signing` - The signing key is unusable
    pub fn issue(&self, id: i64, username: &str, email: &str) -> Result<String, TokenError> {
        let claims = Claims::for_principal(id, username, email, self.lifetime_hours);
        self.sign(&claims)
    }

    /// Sign pre-built claims. Exposed for callers that need full control
    /// over the payload (tests exercising expiry, mainly).
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token's structure, signature, and expiry.
    ///
    /// # Arguments
    /// * `token` - Compact token string to verify
    ///
    /// # Returns
    /// Decoded claims with the principal identity populated
    ///
    /// # Errors
    /// * `Malformed` - Wrong segment count or undecodable content
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Expired` - `exp` is not strictly in the future
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let handler = TokenHandler::new(SECRET, 1);

        let token = handler
            .issue(123, "testuser", "test@example.com")
            .expect("Failed to issue token");

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, 123);
        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let handler = TokenHandler::new(SECRET, 1);

        let result = handler.verify("invalidtoken");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_wrong_secret_is_invalid_signature() {
        let issuer = TokenHandler::new(SECRET, 1);
        let verifier = TokenHandler::new(b"another_secret_key_32_bytes_long!!", 1);

        let token = issuer.issue(1, "alice", "alice@example.com").unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_signature() {
        let handler = TokenHandler::new(SECRET, 1);

        let token = handler.issue(1, "alice", "alice@example.com").unwrap();

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(handler.verify(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = TokenHandler::new(SECRET, 1);

        // Issued two hours ago with a one hour lifetime: past expiry.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            iat: now - 2 * 60 * 60,
            exp: now - 60 * 60,
        };
        let token = handler.sign(&claims).unwrap();

        assert_eq!(handler.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_just_past_expiry_with_zero_leeway() {
        let handler = TokenHandler::new(SECRET, 1);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            iat: now - 60 * 60,
            exp: now - 1,
        };
        let token = handler.sign(&claims).unwrap();

        // One second past expiry already fails: no leeway window.
        assert_eq!(handler.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_before_expiry_succeeds() {
        let handler = TokenHandler::new(SECRET, 1);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            iat: now - 59 * 60,
            exp: now + 60,
        };
        let token = handler.sign(&claims).unwrap();

        assert!(handler.verify(&token).is_ok());
    }
}
