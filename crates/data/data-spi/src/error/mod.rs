//! Dataset error types.

mod dataset_error;

pub use dataset_error::{DatasetError, Result};
