//! Dense row-major feature matrix.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// A dense `rows x cols` matrix of `f64`, stored row-major.
///
/// Invariant: `data.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from a flat row-major buffer.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} values ({}x{})", rows * cols, rows, cols),
                got: format!("{} values", data.len()),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from row vectors. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(PipelineError::InvalidShape {
                    expected: format!("{} columns", cols),
                    got: format!("{} columns in row {}", row.len(), i),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// A matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Borrow row `i`.
    ///
    /// # Panics
    /// If `i >= rows`.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size; a 0-column matrix has no data anyway
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.iter_rows().map(|row| row[j]).collect()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Flat row-major view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Return a new matrix with `f(column, value)` applied to every cell.
    pub fn map_columns<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, f64) -> f64,
    {
        let cols = self.cols;
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(idx, &v)| f(idx % cols, v))
            .collect();
        Self {
            rows: self.rows,
            cols,
            data,
        }
    }

    /// Index of the first non-finite cell, as `(row, col)`.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.cols, idx % self.cols))
    }

    /// Per-column arithmetic mean.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for (s, v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        let n = self.rows.max(1) as f64;
        sums.into_iter().map(|s| s / n).collect()
    }
}
