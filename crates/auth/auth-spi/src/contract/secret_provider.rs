//! Signing secret provider trait definition.

/// Supplies HMAC secrets for issuing and verifying tokens.
pub trait SecretProvider: Send + Sync {
    /// Secret used to sign new tokens.
    fn signing_secret(&self) -> String;

    /// Secrets accepted when verifying, current one first.
    ///
    /// Returning retired secrets here keeps tokens issued before a rotation
    /// valid until they expire.
    fn verification_secrets(&self) -> Vec<String> {
        vec![self.signing_secret()]
    }
}
