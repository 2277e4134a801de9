//! HS256 bearer tokens.

use std::sync::Arc;

use auth_spi::{AuthError, Claims, IssuedToken, Result, SecretProvider};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

/// Default token lifetime in seconds.
pub const DEFAULT_LIFETIME_SECS: u64 = 3600;

/// Issues and verifies tokens signed with the provider's secrets.
#[derive(Clone)]
pub struct TokenService {
    secrets: Arc<dyn SecretProvider>,
    lifetime_secs: u64,
    validation: Validation,
}

impl TokenService {
    pub fn new(secrets: Arc<dyn SecretProvider>, lifetime_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            secrets,
            lifetime_secs,
            validation,
        }
    }

    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }

    /// Sign a token for `subject` valid from now.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken> {
        self.issue_at(subject, get_current_timestamp())
    }

    /// Sign a token as if issued at `now` (Unix seconds).
    pub fn issue_at(&self, subject: &str, now: u64) -> Result<IssuedToken> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.lifetime_secs),
        };
        let key = EncodingKey::from_secret(self.secrets.signing_secret().as_bytes());
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok(IssuedToken::bearer(token, self.lifetime_secs))
    }

    /// Check signature against every accepted secret, then expiry.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut last = AuthError::InvalidToken("no verification secret configured".to_string());
        for secret in self.secrets.verification_secrets() {
            let key = DecodingKey::from_secret(secret.as_bytes());
            match decode::<Claims>(token, &key, &self.validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) => match e.kind() {
                    ErrorKind::InvalidSignature => {
                        last = AuthError::InvalidToken("signature mismatch".to_string());
                    }
                    ErrorKind::ExpiredSignature => return Err(AuthError::TokenExpired),
                    _ => return Err(AuthError::InvalidToken(e.to_string())),
                },
            }
        }
        Err(last)
    }

    /// Verify the value of an `Authorization` header.
    ///
    /// The scheme must be `Bearer` (any case) followed by a non-empty token.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims> {
        let header = header.map(str::trim).filter(|h| !h.is_empty());
        let header = header.ok_or(AuthError::MissingToken)?;
        if header.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::MissingToken);
        }
        let (scheme, token) = header
            .split_once(char::is_whitespace)
            .ok_or_else(|| AuthError::MalformedHeader("expected 'Bearer <token>'".to_string()))?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::MalformedHeader(format!(
                "unsupported scheme '{}'",
                scheme
            )));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.verify(token)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticSecrets;

    fn service(secret: &str) -> TokenService {
        TokenService::new(Arc::new(StaticSecrets::new(secret)), DEFAULT_LIFETIME_SECS)
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service("secret");
        let issued = tokens.issue("admin").unwrap();
        assert_eq!(issued.token_type, "bearer");
        assert_eq!(issued.expires_in, 3600);
        assert_eq!(issued.access_token.matches('.').count(), 2);

        let claims = tokens.verify(&issued.access_token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token() {
        let tokens = service("secret");
        let stale = tokens
            .issue_at("admin", get_current_timestamp() - 7200)
            .unwrap();
        assert_eq!(
            tokens.verify(&stale.access_token),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issued = service("other").issue("admin").unwrap();
        assert!(matches!(
            service("secret").verify(&issued.access_token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            service("secret").verify("not-a-token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = service("secret");
        let admin = tokens.issue("admin").unwrap().access_token;
        let root = tokens.issue("root").unwrap().access_token;

        // root's header and payload with admin's signature
        let root_parts: Vec<&str> = root.split('.').collect();
        let admin_sig = admin.rsplit('.').next().unwrap();
        let forged = format!("{}.{}.{}", root_parts[0], root_parts[1], admin_sig);
        assert!(matches!(
            tokens.verify(&forged),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rotated_secret_still_verifies() {
        let old = service("old");
        let issued = old.issue("admin").unwrap();

        let rotated = TokenService::new(
            Arc::new(StaticSecrets::new("new").with_previous(["old"])),
            DEFAULT_LIFETIME_SECS,
        );
        assert_eq!(rotated.verify(&issued.access_token).unwrap().sub, "admin");
        // new tokens use the new secret only
        let fresh = rotated.issue("admin").unwrap();
        assert!(old.verify(&fresh.access_token).is_err());
    }

    #[test]
    fn test_verify_header_forms() {
        let tokens = service("secret");
        let token = tokens.issue("admin").unwrap().access_token;

        assert!(tokens.verify_header(Some(&format!("Bearer {}", token))).is_ok());
        assert!(tokens.verify_header(Some(&format!("bearer {}", token))).is_ok());
        assert!(tokens.verify_header(Some(&format!("BEARER  {}", token))).is_ok());

        assert_eq!(tokens.verify_header(None), Err(AuthError::MissingToken));
        assert_eq!(tokens.verify_header(Some("")), Err(AuthError::MissingToken));
        assert_eq!(tokens.verify_header(Some("Bearer ")), Err(AuthError::MissingToken));
        assert!(matches!(
            tokens.verify_header(Some(&token)),
            Err(AuthError::MalformedHeader(_))
        ));
        assert!(matches!(
            tokens.verify_header(Some(&format!("Basic {}", token))),
            Err(AuthError::MalformedHeader(_))
        ));
        assert!(matches!(
            tokens.verify_header(Some("Bearer abc.def.ghi")),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
