//! Token models.

use serde::{Deserialize, Serialize};

/// `token_type` reported to clients.
pub const TOKEN_TYPE: &str = "bearer";

/// Signed claims: subject, issue time and expiry in Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Response body of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

impl IssuedToken {
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_wire_shape() {
        let token = IssuedToken::bearer("a.b.c".to_string(), 3600);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "access_token": "a.b.c",
                "token_type": "bearer",
                "expires_in": 3600
            })
        );
    }
}
