//! Table source trait definition.

use crate::error::Result;
use crate::model::RawTable;

/// Anything that can yield the raw, untyped rows of a dataset.
///
/// Implementations return cells as text; typing and cleaning happen in the
/// preparation stage so every source gets the same missing-value rules.
pub trait TableSource: Send + Sync {
    /// Source name, used in logs.
    fn name(&self) -> &str;

    /// Read the whole table.
    fn read_table(&self) -> Result<RawTable>;
}
