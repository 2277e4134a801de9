//! Dataset preparation configuration types.

use data_spi::{DatasetError, Result};
use serde::{Deserialize, Serialize};

pub const X_TRAIN_FILE: &str = "X_train.csv";
pub const X_TEST_FILE: &str = "X_test.csv";
pub const Y_TRAIN_FILE: &str = "y_train.csv";
pub const Y_TEST_FILE: &str = "y_test.csv";

pub const DEFAULT_TARGET: &str = "Chance of Admit";
pub const DEFAULT_DROP_COLUMNS: &[&str] = &["Serial No."];
pub const DEFAULT_TEST_RATIO: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

/// How a raw table is cleaned and split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Target column name, matched after header trimming
    pub target: String,
    /// Identifier columns removed when present
    pub drop_columns: Vec<String>,
    /// Fraction of rows held out for testing
    pub test_ratio: f64,
    /// Shuffle seed
    pub seed: u64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            drop_columns: DEFAULT_DROP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
        }
    }
}

impl PrepareConfig {
    pub fn builder() -> PrepareConfigBuilder {
        PrepareConfigBuilder::new()
    }

    /// Number of held-out rows for `n` usable rows: `ceil(test_ratio * n)`.
    pub fn test_size(&self, n: usize) -> usize {
        (self.test_ratio * n as f64).ceil() as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(DatasetError::InvalidParameter {
                name: "target".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(DatasetError::InvalidParameter {
                name: "test_ratio".to_string(),
                reason: format!("must be in (0, 1), got {}", self.test_ratio),
            });
        }
        Ok(())
    }
}

/// Builder for PrepareConfig.
#[derive(Debug, Default)]
pub struct PrepareConfigBuilder {
    target: Option<String>,
    drop_columns: Option<Vec<String>>,
    test_ratio: Option<f64>,
    seed: Option<u64>,
}

impl PrepareConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn drop_columns(mut self, columns: &[&str]) -> Self {
        self.drop_columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = Some(ratio);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<PrepareConfig> {
        let defaults = PrepareConfig::default();
        let config = PrepareConfig {
            target: self
                .target
                .map(|t| t.trim().to_string())
                .unwrap_or(defaults.target),
            drop_columns: self.drop_columns.unwrap_or(defaults.drop_columns),
            test_ratio: self.test_ratio.unwrap_or(defaults.test_ratio),
            seed: self.seed.unwrap_or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }
}
