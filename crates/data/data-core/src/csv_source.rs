//! CSV file table source.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use data_spi::{RawTable, Result, TableSource};

use crate::csv_error;

/// Reads a headed CSV file from disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for CsvFileSource {
    fn name(&self) -> &str {
        "csv_file"
    }

    fn read_table(&self) -> Result<RawTable> {
        let file = File::open(&self.path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(RawTable::new(headers, rows))
    }
}
