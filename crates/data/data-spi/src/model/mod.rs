//! Dataset models.

mod raw_table;
mod split;

pub use raw_table::{is_missing, RawTable};
pub use split::{PrepareSummary, TrainTestSplit};
