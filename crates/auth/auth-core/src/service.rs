//! Login and request authorization.

use std::sync::Arc;

use auth_spi::{AuthError, Claims, CredentialStore, IssuedToken, Result};
use tracing::{debug, info, warn};

use crate::token::TokenService;

/// Credential check plus token issuance and verification.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, tokens: TokenService) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Issue a token when the credentials match. No lockout or rate limit.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken> {
        if !self.credentials.verify(username, password) {
            warn!(user = username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let token = self.tokens.issue(username)?;
        info!(user = username, expires_in = token.expires_in, "issued token");
        Ok(token)
    }

    /// Authorize a request from its `Authorization` header value.
    pub fn authorize(&self, header: Option<&str>) -> Result<Claims> {
        let claims = self.tokens.verify_header(header).map_err(|e| {
            debug!(error = %e, "authorization failed");
            e
        })?;
        debug!(user = %claims.sub, "authorized request");
        Ok(claims)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
