//! Regression accuracy metrics
//!
//! All functions return `f64::NAN` when the inputs are empty or of unequal length.

use pipeline_spi::{EvaluationMetrics, PipelineError, Result};

/// Mean Absolute Error
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum / actual.len() as f64
}

/// Mean Squared Error
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sum / actual.len() as f64
}

/// Root Mean Squared Error
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Coefficient of determination.
///
/// A constant `actual` gives 1.0 for a perfect fit and 0.0 otherwise.
pub fn r2(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// R², MAE and RMSE in one pass over validated inputs.
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<EvaluationMetrics> {
    if actual.is_empty() {
        return Err(PipelineError::EmptyData(
            "cannot evaluate on an empty split".to_string(),
        ));
    }
    if actual.len() != predicted.len() {
        return Err(PipelineError::LengthMismatch {
            rows: predicted.len(),
            targets: actual.len(),
        });
    }
    Ok(EvaluationMetrics::new(
        r2(actual, predicted),
        mae(actual, predicted),
        rmse(actual, predicted),
    ))
}
