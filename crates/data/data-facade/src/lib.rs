//! Dataset Facade
//!
//! Unified re-exports for dataset preparation:
//! - `data_spi` - Table source trait, split models and errors
//! - `data_api` - Preparation configuration and split file names
//! - `data_core` - CSV reading, cleaning, splitting and persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use data_facade::{load_split, prepare, PrepareConfig};
//! use std::path::Path;
//!
//! let summary = prepare(
//!     Path::new("data/admission.csv"),
//!     Path::new("data/processed"),
//!     &PrepareConfig::default(),
//! )?;
//! let split = load_split(Path::new("data/processed"))?;
//! assert_eq!(split.train_len(), summary.train_rows);
//! ```

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;
