//! Dataset API
//!
//! Configuration types and the on-disk layout of a prepared split.

mod config;

pub use config::{
    PrepareConfig, PrepareConfigBuilder, DEFAULT_DROP_COLUMNS, DEFAULT_SEED, DEFAULT_TARGET,
    DEFAULT_TEST_RATIO, X_TEST_FILE, X_TRAIN_FILE, Y_TEST_FILE, Y_TRAIN_FILE,
};
