//! Fixed credential pair.

use auth_spi::CredentialStore;

/// A single username/password pair, typically read from the environment.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so timing does not reveal which one failed.
        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        user_ok & pass_ok
    }
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let creds = StaticCredentials::new("admin", "admin123");
        assert!(creds.verify("admin", "admin123"));
        assert!(!creds.verify("admin", "wrong"));
        assert!(!creds.verify("Admin", "admin123"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"admin123", b"admin123"));
        assert!(!constant_time_eq(b"admin123", b"admin124"));
        assert!(!constant_time_eq(b"admin", b"admin123"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = StaticCredentials::new("admin", "admin123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("admin123"));
    }
}
