//! Fixed signing secrets.

use auth_spi::SecretProvider;

/// Current signing secret and any previous secrets still accepted.
#[derive(Clone)]
pub struct StaticSecrets {
    current: String,
    previous: Vec<String>,
}

impl StaticSecrets {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            previous: Vec::new(),
        }
    }

    /// Keep accepting tokens signed with `previous`.
    pub fn with_previous<I, S>(mut self, previous: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.previous.extend(previous.into_iter().map(Into::into));
        self
    }
}

impl std::fmt::Debug for StaticSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecrets")
            .field("previous", &self.previous.len())
            .finish_non_exhaustive()
    }
}

impl SecretProvider for StaticSecrets {
    fn signing_secret(&self) -> String {
        self.current.clone()
    }

    fn verification_secrets(&self) -> Vec<String> {
        std::iter::once(&self.current)
            .chain(&self.previous)
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }
}
