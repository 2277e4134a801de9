//! Credential store trait definition.

/// Checks a username/password pair.
pub trait CredentialStore: Send + Sync {
    /// `true` when the pair is valid.
    fn verify(&self, username: &str, password: &str) -> bool;
}
