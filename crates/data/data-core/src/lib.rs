//! Dataset Core
//!
//! Reads the raw admissions table, removes identifier columns and incomplete
//! rows, shuffles with a fixed seed and writes the train/test split files.

mod csv_source;
mod prepare;
mod split_io;

pub use csv_source::CsvFileSource;
pub use prepare::{prepare, prepare_from, split_table};
pub use split_io::{load_split, write_split};

pub(crate) fn csv_error(err: csv::Error) -> data_spi::DatasetError {
    data_spi::DatasetError::Csv(err.to_string())
}
