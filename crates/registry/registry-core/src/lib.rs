//! Model Registry Core
//!
//! Filesystem implementation of [`ModelStore`].

mod fs_store;

pub use fs_store::{FsModelStore, LATEST_FILE, METADATA_FILE, PIPELINE_FILE};
pub use registry_spi::*;
