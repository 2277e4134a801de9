//! `name:version` model tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Version alias for the most recently saved entry.
pub const LATEST: &str = "latest";

/// Reference to a stored model.
///
/// `version == None` means "latest". Parsed from `name`, `name:latest` or
/// `name:<version>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelTag {
    name: String,
    version: Option<String>,
}

impl ModelTag {
    /// Tag pointing at the latest version of `name`.
    pub fn latest(name: &str) -> Result<Self> {
        validate_segment(name, name, "name")?;
        Ok(Self {
            name: name.to_string(),
            version: None,
        })
    }

    /// Tag pointing at a specific version.
    pub fn versioned(name: &str, version: &str) -> Result<Self> {
        let tag = format!("{}:{}", name, version);
        validate_segment(&tag, name, "name")?;
        validate_segment(&tag, version, "version")?;
        Ok(Self {
            name: name.to_string(),
            version: (version != LATEST).then(|| version.to_string()),
        })
    }

    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        let mut parts = tag.split(':');
        let name = parts.next().unwrap_or_default();
        let version = parts.next();
        if parts.next().is_some() {
            return Err(invalid(tag, "too many ':' separators"));
        }
        match version {
            None => {
                validate_segment(tag, name, "name")?;
                Ok(Self {
                    name: name.to_string(),
                    version: None,
                })
            }
            Some(version) => Self::versioned(name, version),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concrete version, or `None` for latest.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn is_latest(&self) -> bool {
        self.version.is_none()
    }
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version().unwrap_or(LATEST))
    }
}

impl FromStr for ModelTag {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn invalid(tag: &str, reason: &str) -> RegistryError {
    RegistryError::InvalidTag {
        tag: tag.to_string(),
        reason: reason.to_string(),
    }
}

/// Segments become directory names, so they must be plain path components.
fn validate_segment(tag: &str, segment: &str, what: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(invalid(tag, &format!("empty {}", what)));
    }
    if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(invalid(tag, &format!("{} is not a plain path component", what)));
    }
    if segment.chars().any(char::is_whitespace) {
        return Err(invalid(tag, &format!("{} contains whitespace", what)));
    }
    Ok(())
}
