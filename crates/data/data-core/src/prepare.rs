//! Cleaning and seeded train/test splitting.

use std::path::Path;

use data_api::PrepareConfig;
use data_spi::{
    is_missing, DatasetError, FeatureMatrix, PrepareSummary, RawTable, Result, TableSource,
    TrainTestSplit,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::csv_source::CsvFileSource;
use crate::split_io::write_split;

/// Read `raw_path`, clean and split it, and write the four split files to `out_dir`.
pub fn prepare(raw_path: &Path, out_dir: &Path, config: &PrepareConfig) -> Result<PrepareSummary> {
    prepare_from(&CsvFileSource::new(raw_path), out_dir, config)
}

/// [`prepare`] for any [`TableSource`].
pub fn prepare_from(
    source: &dyn TableSource,
    out_dir: &Path,
    config: &PrepareConfig,
) -> Result<PrepareSummary> {
    let table = source.read_table()?;
    debug!(source = source.name(), rows = table.len(), "read raw table");

    let (split, summary) = split_table(&table, config)?;
    write_split(&split, out_dir)?;

    info!(
        rows_read = summary.rows_read,
        rows_dropped = summary.rows_dropped,
        train = summary.train_rows,
        test = summary.test_rows,
        out_dir = %out_dir.display(),
        "prepared dataset"
    );
    Ok(summary)
}

/// Clean `table` and split it in memory.
///
/// Rows with a missing feature or target cell are dropped; any other cell
/// that does not parse as a finite number is an error. The shuffled index
/// order puts the first `ceil(test_ratio * n)` rows in the test partition.
pub fn split_table(
    table: &RawTable,
    config: &PrepareConfig,
) -> Result<(TrainTestSplit, PrepareSummary)> {
    config.validate()?;

    let target_idx = table
        .column_index(&config.target)
        .ok_or_else(|| DatasetError::MissingColumn {
            column: config.target.clone(),
            available: table.headers.clone(),
        })?;

    let feature_idx: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, name)| {
            *i != target_idx && !config.drop_columns.iter().any(|d| d.trim() == name.as_str())
        })
        .map(|(i, _)| i)
        .collect();
    if feature_idx.is_empty() {
        return Err(DatasetError::EmptyData(
            "no feature columns left after dropping identifiers".to_string(),
        ));
    }
    let feature_names: Vec<String> = feature_idx
        .iter()
        .map(|&i| table.headers[i].clone())
        .collect();

    let mut features: Vec<Vec<f64>> = Vec::with_capacity(table.len());
    let mut target: Vec<f64> = Vec::with_capacity(table.len());
    let mut dropped = 0;

    for (row_no, row) in table.rows.iter().enumerate() {
        if row.len() != table.headers.len() {
            return Err(DatasetError::ShapeMismatch(format!(
                "row {} has {} cells, header has {}",
                row_no + 1,
                row.len(),
                table.headers.len()
            )));
        }
        if feature_idx
            .iter()
            .chain(std::iter::once(&target_idx))
            .any(|&i| is_missing(&row[i]))
        {
            dropped += 1;
            continue;
        }

        let mut values = Vec::with_capacity(feature_idx.len());
        for &i in &feature_idx {
            values.push(parse_cell(&row[i], row_no + 1, &table.headers[i])?);
        }
        target.push(parse_cell(&row[target_idx], row_no + 1, &config.target)?);
        features.push(values);
    }

    if dropped > 0 {
        debug!(dropped, "dropped rows with missing values");
    }

    let n = target.len();
    let test_n = config.test_size(n);
    if n < 2 || test_n >= n {
        return Err(DatasetError::EmptyData(format!(
            "need at least 2 complete rows to split, got {}",
            n
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(config.seed));
    let (test_idx, train_idx) = order.split_at(test_n);

    let split = TrainTestSplit {
        x_train: gather_rows(&features, train_idx)?,
        x_test: gather_rows(&features, test_idx)?,
        y_train: train_idx.iter().map(|&i| target[i]).collect(),
        y_test: test_idx.iter().map(|&i| target[i]).collect(),
        feature_names: feature_names.clone(),
        target_name: config.target.clone(),
    };
    let summary = PrepareSummary {
        rows_read: table.len(),
        rows_dropped: dropped,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
        feature_names,
        target_name: config.target.clone(),
    };
    Ok((split, summary))
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64> {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DatasetError::NonNumeric {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

fn gather_rows(features: &[Vec<f64>], indices: &[usize]) -> Result<FeatureMatrix> {
    let rows: Vec<Vec<f64>> = indices.iter().map(|&i| features[i].clone()).collect();
    FeatureMatrix::from_rows(&rows).map_err(|e| DatasetError::ShapeMismatch(e.to_string()))
}
