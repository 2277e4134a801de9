//! Authentication error types.

use thiserror::Error;

/// Authentication failures. Every variant maps to 401 at the HTTP boundary
/// except [`AuthError::Signing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    /// `Authorization` header present but not `Bearer <token>`
    #[error("Malformed authorization header: {0}")]
    MalformedHeader(String),

    /// Bad signature, bad structure or wrong algorithm
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    /// Token could not be produced
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(AuthError::MissingToken.to_string(), "Missing bearer token");
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
        assert_eq!(
            AuthError::MalformedHeader("expected Bearer scheme".to_string()).to_string(),
            "Malformed authorization header: expected Bearer scheme"
        );
        assert_eq!(
            AuthError::InvalidToken("InvalidSignature".to_string()).to_string(),
            "Invalid token: InvalidSignature"
        );
    }
}
