//! Environment configuration.

use std::env;
use std::path::PathBuf;

use crate::error::StartupError;

pub const DEFAULT_MODEL_TAG: &str = "admissions_lr:latest";
pub const DEFAULT_MODEL_STORE_DIR: &str = "models";
pub const DEFAULT_JWT_SECRET: &str = "dev_secret_change_me";
pub const DEFAULT_JWT_EXP_SECONDS: u64 = 3600;
pub const DEFAULT_API_USER: &str = "admin";
pub const DEFAULT_API_PASS: &str = "admin123";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Everything the server reads from its environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub model_tag: String,
    pub model_store_dir: PathBuf,
    pub jwt_secret: String,
    /// Retired secrets still accepted for verification (`JWT_PREVIOUS_SECRETS`, comma-separated)
    pub jwt_previous_secrets: Vec<String>,
    pub jwt_exp_seconds: u64,
    pub api_user: String,
    pub api_pass: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_tag: DEFAULT_MODEL_TAG.to_string(),
            model_store_dir: PathBuf::from(DEFAULT_MODEL_STORE_DIR),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_previous_secrets: Vec::new(),
            jwt_exp_seconds: DEFAULT_JWT_EXP_SECONDS,
            api_user: DEFAULT_API_USER.to_string(),
            api_pass: DEFAULT_API_PASS.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_exp_seconds = match get("JWT_EXP_SECONDS") {
            Some(raw) => parse_positive("JWT_EXP_SECONDS", &raw)?,
            None => defaults.jwt_exp_seconds,
        };
        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| StartupError::Config {
                name: "PORT".to_string(),
                reason: format!("'{}' is not a valid port", raw),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            model_tag: get("MODEL_TAG").unwrap_or(defaults.model_tag),
            model_store_dir: get("MODEL_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_store_dir),
            jwt_secret: get("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_previous_secrets: get("JWT_PREVIOUS_SECRETS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            jwt_exp_seconds,
            api_user: get("API_USER").unwrap_or(defaults.api_user),
            api_pass: get("API_PASS").unwrap_or(defaults.api_pass),
            host: get("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Settings that are fine for local use but unsafe in production.
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut found = Vec::new();
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            found.push("JWT_SECRET");
        }
        if self.api_user == DEFAULT_API_USER && self.api_pass == DEFAULT_API_PASS {
            found.push("API_USER/API_PASS");
        }
        found
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("model_tag", &self.model_tag)
            .field("model_store_dir", &self.model_store_dir)
            .field("jwt_exp_seconds", &self.jwt_exp_seconds)
            .field("api_user", &self.api_user)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u64, StartupError> {
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(StartupError::Config {
            name: name.to_string(),
            reason: format!("'{}' is not a positive integer", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.model_tag, "admissions_lr:latest");
        assert_eq!(config.model_store_dir, PathBuf::from("models"));
        assert_eq!(config.jwt_exp_seconds, 3600);
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(
            config.insecure_defaults(),
            vec!["JWT_SECRET", "API_USER/API_PASS"]
        );
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("MODEL_TAG", "admissions_lr:20240101"),
            ("JWT_SECRET", "prod"),
            ("JWT_PREVIOUS_SECRETS", "old1, old2,,"),
            ("JWT_EXP_SECONDS", "60"),
            ("API_PASS", "hunter2"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.model_tag, "admissions_lr:20240101");
        assert_eq!(config.jwt_previous_secrets, vec!["old1", "old2"]);
        assert_eq!(config.jwt_exp_seconds, 60);
        assert_eq!(config.port, 8080);
        assert!(config.insecure_defaults().is_empty());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "  ")])).unwrap();
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
    }

    #[test]
    fn test_invalid_numbers() {
        for (key, value) in [
            ("JWT_EXP_SECONDS", "soon"),
            ("JWT_EXP_SECONDS", "0"),
            ("PORT", "70000"),
        ] {
            let result = ServerConfig::from_lookup(lookup(&[(key, value)]));
            assert!(
                matches!(result, Err(StartupError::Config { ref name, .. }) if name == key),
                "{}={} accepted",
                key,
                value
            );
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "topsecret")])).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("admin123"));
    }
}
