//! Linear Regression estimator
//!
//! Ordinary least squares with an intercept. The intercept is handled by
//! centring `X` and `y`, so the normal equations only involve the
//! coefficient vector:
//!
//! ```text
//! (Xcᵀ Xc) w = Xcᵀ yc
//! b = mean(y) - mean(X) · w
//! ```
//!
//! The `p x p` system is solved by Gaussian elimination with partial
//! pivoting. Rank-deficient designs are reported as
//! [`PipelineError::SingularMatrix`] instead of picking a minimum-norm
//! solution.

use pipeline_spi::{Estimator, FeatureMatrix, PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Relative pivot threshold below which the system is considered singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Linear Regression model fitted by ordinary least squares.
///
/// Predicts `y = intercept + coefficients · x`.
///
/// # Example
///
/// ```rust
/// use pipeline_api::{Estimator, FeatureMatrix, LinearRegression};
///
/// let x = FeatureMatrix::from_rows(&[vec![0.0], vec![1.0], vec![2.0]]).unwrap();
/// let mut model = LinearRegression::new();
/// model.fit(&x, &[1.0, 3.0, 5.0]).unwrap();
///
/// assert!((model.intercept() - 1.0).abs() < 1e-9);
/// assert!((model.coefficients()[0] - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
    /// Number of observations used in fitting
    n_observations: usize,
    fitted: bool,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an already-fitted model from known parameters.
    pub fn from_parameters(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            n_observations: 0,
            fitted: true,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }
}

impl Estimator for LinearRegression {
    fn fit(&mut self, data: &FeatureMatrix, target: &[f64]) -> Result<()> {
        if data.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot fit linear regression on empty data".to_string(),
            ));
        }
        if data.rows() != target.len() {
            return Err(PipelineError::LengthMismatch {
                rows: data.rows(),
                targets: target.len(),
            });
        }

        let p = data.cols();
        let x_mean = data.column_means();
        let y_mean = target.iter().sum::<f64>() / target.len() as f64;

        // Gram matrix and moment vector of the centred design
        let mut gram = vec![vec![0.0; p]; p];
        let mut moment = vec![0.0; p];
        let mut centred = vec![0.0; p];
        for (row, &y) in data.iter_rows().zip(target) {
            for (c, (x, m)) in centred.iter_mut().zip(row.iter().zip(&x_mean)) {
                *c = x - m;
            }
            let yc = y - y_mean;
            for i in 0..p {
                moment[i] += centred[i] * yc;
                for j in i..p {
                    gram[i][j] += centred[i] * centred[j];
                }
            }
        }
        for i in 0..p {
            for j in 0..i {
                gram[i][j] = gram[j][i];
            }
        }

        let coefficients = solve(gram, moment)?;
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(w, m)| w * m)
                .sum::<f64>();

        self.coefficients = coefficients;
        self.intercept = intercept;
        self.n_observations = data.rows();
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, data: &FeatureMatrix) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(PipelineError::NotFitted(self.name().to_string()));
        }
        if data.cols() != self.coefficients.len() {
            return Err(PipelineError::FeatureMismatch {
                expected: self.coefficients.len(),
                got: data.cols(),
            });
        }
        Ok(data
            .iter_rows()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, w)| x * w)
                        .sum::<f64>()
            })
            .collect())
    }

    fn name(&self) -> &str {
        "linear_regression"
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn n_features_in(&self) -> Option<usize> {
        self.fitted.then_some(self.coefficients.len())
    }
}

/// Solve `a · x = b` for square `a` by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(f64::MIN_POSITIVE);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() <= PIVOT_TOLERANCE * scale {
            return Err(PipelineError::SingularMatrix(format!(
                "feature column {} is constant or linearly dependent on the others",
                col
            )));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
