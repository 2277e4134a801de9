//! Pipeline error types.

use thiserror::Error;

/// Errors raised while fitting or applying a pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// No rows (or no columns) where data was required
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Flat buffer length does not match the declared shape
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },

    /// Column count differs from the one seen during fit
    #[error("Feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Row count and target length disagree
    #[error("Length mismatch: {rows} rows but {targets} target values")]
    LengthMismatch { rows: usize, targets: usize },

    /// A step or estimator was used before `fit`
    #[error("{0} must be fitted before use")]
    NotFitted(String),

    /// The least-squares system has no unique solution
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// NaN or infinite value in input or output
    #[error("Non-finite value: {0}")]
    NonFiniteValue(String),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_mismatch_display() {
        let error = PipelineError::FeatureMismatch {
            expected: 7,
            got: 3,
        };
        assert_eq!(
            error.to_string(),
            "Feature mismatch: expected 7 features, got 3"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let error = PipelineError::LengthMismatch {
            rows: 10,
            targets: 9,
        };
        assert_eq!(
            error.to_string(),
            "Length mismatch: 10 rows but 9 target values"
        );
    }

    #[test]
    fn test_not_fitted_display() {
        let error = PipelineError::NotFitted("standardize".to_string());
        assert_eq!(error.to_string(), "standardize must be fitted before use");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = PipelineError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: "must be in (0, 1)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'test_ratio': must be in (0, 1)"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(PipelineError::SingularMatrix("rank 2 < 3".to_string()));
        assert_eq!(error.to_string(), "Singular matrix: rank 2 < 3");
    }
}
