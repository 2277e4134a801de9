//! Dataset contracts.

mod table_source;

pub use table_source::TableSource;
