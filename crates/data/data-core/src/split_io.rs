//! Writing and reading the four split files.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use data_api::{X_TEST_FILE, X_TRAIN_FILE, Y_TEST_FILE, Y_TRAIN_FILE};
use data_spi::{DatasetError, FeatureMatrix, Result, TrainTestSplit};
use tracing::debug;

use crate::csv_error;

/// Write `X_train.csv`, `X_test.csv`, `y_train.csv` and `y_test.csv` into `dir`.
pub fn write_split(split: &TrainTestSplit, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    write_matrix(&dir.join(X_TRAIN_FILE), &split.feature_names, &split.x_train)?;
    write_matrix(&dir.join(X_TEST_FILE), &split.feature_names, &split.x_test)?;
    write_target(&dir.join(Y_TRAIN_FILE), &split.target_name, &split.y_train)?;
    write_target(&dir.join(Y_TEST_FILE), &split.target_name, &split.y_test)?;
    debug!(dir = %dir.display(), "wrote split files");
    Ok(())
}

/// Read a split previously written by [`write_split`].
pub fn load_split(dir: &Path) -> Result<TrainTestSplit> {
    let (feature_names, x_train) = read_matrix(&dir.join(X_TRAIN_FILE))?;
    let (test_names, x_test) = read_matrix(&dir.join(X_TEST_FILE))?;
    if test_names != feature_names {
        return Err(DatasetError::ShapeMismatch(format!(
            "{} columns {:?} differ from {} columns {:?}",
            X_TEST_FILE, test_names, X_TRAIN_FILE, feature_names
        )));
    }

    let (target_name, y_train) = read_target(&dir.join(Y_TRAIN_FILE))?;
    let (test_target, y_test) = read_target(&dir.join(Y_TEST_FILE))?;
    if test_target != target_name {
        return Err(DatasetError::ShapeMismatch(format!(
            "{} target '{}' differs from {} target '{}'",
            Y_TEST_FILE, test_target, Y_TRAIN_FILE, target_name
        )));
    }

    check_rows(X_TRAIN_FILE, x_train.rows(), Y_TRAIN_FILE, y_train.len())?;
    check_rows(X_TEST_FILE, x_test.rows(), Y_TEST_FILE, y_test.len())?;
    if x_train.is_empty() {
        return Err(DatasetError::EmptyData(format!("{} has no rows", X_TRAIN_FILE)));
    }

    Ok(TrainTestSplit {
        feature_names,
        target_name,
        x_train,
        x_test,
        y_train,
        y_test,
    })
}

fn check_rows(x_file: &str, x_rows: usize, y_file: &str, y_rows: usize) -> Result<()> {
    if x_rows != y_rows {
        return Err(DatasetError::ShapeMismatch(format!(
            "{} has {} rows but {} has {}",
            x_file, x_rows, y_file, y_rows
        )));
    }
    Ok(())
}

fn write_matrix(path: &Path, headers: &[String], matrix: &FeatureMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(headers).map_err(csv_error)?;
    for row in matrix.iter_rows() {
        writer
            .write_record(row.iter().map(f64::to_string))
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_target(path: &Path, name: &str, values: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record([name]).map_err(csv_error)?;
    for v in values {
        writer.write_record([v.to_string()]).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_numeric(path: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let mut values = Vec::with_capacity(headers.len());
        for (cell, column) in record.iter().zip(&headers) {
            let value = cell
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DatasetError::NonNumeric {
                    row: row_no + 1,
                    column: column.clone(),
                    value: cell.to_string(),
                })?;
            values.push(value);
        }
        rows.push(values);
    }
    Ok((headers, rows))
}

fn read_matrix(path: &Path) -> Result<(Vec<String>, FeatureMatrix)> {
    let (headers, rows) = read_numeric(path)?;
    let matrix = if rows.is_empty() {
        FeatureMatrix::zeros(0, headers.len())
    } else {
        FeatureMatrix::from_rows(&rows).map_err(|e| DatasetError::ShapeMismatch(e.to_string()))?
    };
    Ok((headers, matrix))
}

fn read_target(path: &Path) -> Result<(String, Vec<f64>)> {
    let (headers, rows) = read_numeric(path)?;
    match headers.as_slice() {
        [name] => Ok((name.clone(), rows.into_iter().map(|r| r[0]).collect())),
        _ => Err(DatasetError::ShapeMismatch(format!(
            "{} must have exactly one column, found {}",
            path.display(),
            headers.len()
        ))),
    }
}
