//! Pipeline Core
//!
//! Composition of transform steps and a terminal estimator, plus the
//! regression metrics used to evaluate a fitted pipeline.

pub use pipeline_spi::{
    Estimator, EvaluationMetrics, FeatureMatrix, PipelineError, PipelineStep, Result,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod metrics;

/// Ordered transform steps ending in one estimator.
///
/// `fit` feeds each step the output of the previous one; `predict` replays
/// the fitted steps in the same order before calling the estimator, so the
/// column order seen at inference must match the order used in training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline<S, E> {
    steps: Vec<S>,
    estimator: E,
}

impl<S: PipelineStep, E: Estimator> Pipeline<S, E> {
    /// Pipeline with no transform steps.
    pub fn new(estimator: E) -> Self {
        Self {
            steps: Vec::new(),
            estimator,
        }
    }

    /// Builder-style [`add_step`](Self::add_step).
    pub fn with_step(mut self, step: S) -> Self {
        self.steps.push(step);
        self
    }

    pub fn add_step(&mut self, step: S) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Names of every stage, estimator last.
    pub fn stage_names(&self) -> Vec<&str> {
        self.steps
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.estimator.name()))
            .collect()
    }

    pub fn is_fitted(&self) -> bool {
        self.steps.iter().all(|s| s.is_fitted()) && self.estimator.is_fitted()
    }

    /// Number of input columns the fitted pipeline expects.
    pub fn n_features_in(&self) -> Option<usize> {
        match self.steps.first() {
            Some(step) => step.n_features_in(),
            None => self.estimator.n_features_in(),
        }
    }

    /// Fit every step in order, then the estimator on the transformed data.
    pub fn fit(&mut self, data: &FeatureMatrix, target: &[f64]) -> Result<()> {
        if data.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot fit a pipeline on an empty matrix".to_string(),
            ));
        }
        if data.rows() != target.len() {
            return Err(PipelineError::LengthMismatch {
                rows: data.rows(),
                targets: target.len(),
            });
        }
        if let Some((row, col)) = data.first_non_finite() {
            return Err(PipelineError::NonFiniteValue(format!(
                "training matrix at row {}, column {}",
                row, col
            )));
        }
        if let Some(idx) = target.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::NonFiniteValue(format!(
                "training target at row {}",
                idx
            )));
        }

        let mut current = data.clone();
        for step in &mut self.steps {
            current = step.fit_transform(&current)?;
            debug!(step = step.name(), "fitted pipeline step");
        }
        self.estimator.fit(&current, target)?;
        debug!(estimator = self.estimator.name(), "fitted estimator");
        Ok(())
    }

    /// Run the fitted steps only.
    pub fn transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
        let mut current = data.clone();
        for step in &self.steps {
            if !step.is_fitted() {
                return Err(PipelineError::NotFitted(step.name().to_string()));
            }
            current = step.transform(&current)?;
        }
        Ok(current)
    }

    /// Transform `data` through every step and predict one value per row.
    pub fn predict(&self, data: &FeatureMatrix) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(PipelineError::NotFitted("pipeline".to_string()));
        }
        if let Some(expected) = self.n_features_in() {
            if data.cols() != expected {
                return Err(PipelineError::FeatureMismatch {
                    expected,
                    got: data.cols(),
                });
            }
        }
        let transformed = self.transform(data)?;
        self.estimator.predict(&transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adds a learned offset to every cell.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Shift {
        offset: Option<f64>,
        n_features: usize,
    }

    impl PipelineStep for Shift {
        fn fit(&mut self, data: &FeatureMatrix) -> Result<()> {
            self.offset = Some(1.0);
            self.n_features = data.cols();
            Ok(())
        }

        fn transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
            let offset = self.offset.unwrap_or_default();
            Ok(data.map_columns(|_, v| v + offset))
        }

        fn inverse_transform(&self, data: &FeatureMatrix) -> Result<FeatureMatrix> {
            let offset = self.offset.unwrap_or_default();
            Ok(data.map_columns(|_, v| v - offset))
        }

        fn name(&self) -> &str {
            "shift"
        }

        fn is_fitted(&self) -> bool {
            self.offset.is_some()
        }

        fn n_features_in(&self) -> Option<usize> {
            self.offset.map(|_| self.n_features)
        }
    }

    /// Predicts the sum of each row.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct RowSum {
        n_features: Option<usize>,
    }

    impl Estimator for RowSum {
        fn fit(&mut self, data: &FeatureMatrix, _target: &[f64]) -> Result<()> {
            self.n_features = Some(data.cols());
            Ok(())
        }

        fn predict(&self, data: &FeatureMatrix) -> Result<Vec<f64>> {
            Ok(data.iter_rows().map(|r| r.iter().sum()).collect())
        }

        fn name(&self) -> &str {
            "row_sum"
        }

        fn is_fitted(&self) -> bool {
            self.n_features.is_some()
        }

        fn n_features_in(&self) -> Option<usize> {
            self.n_features
        }
    }

    fn shift() -> Shift {
        Shift {
            offset: None,
            n_features: 0,
        }
    }

    fn data() -> FeatureMatrix {
        FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_fit_then_predict_runs_steps_in_order() {
        let mut pipeline = Pipeline::new(RowSum::default())
            .with_step(shift())
            .with_step(shift());
        pipeline.fit(&data(), &[0.0, 0.0]).unwrap();

        // each shift adds 1.0 to both columns
        let preds = pipeline.predict(&data()).unwrap();
        assert_eq!(preds, vec![7.0, 11.0]);
        assert_eq!(pipeline.stage_names(), vec!["shift", "shift", "row_sum"]);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let pipeline = Pipeline::new(RowSum::default()).with_step(shift());
        assert!(matches!(
            pipeline.predict(&data()),
            Err(PipelineError::NotFitted(_))
        ));
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let mut pipeline: Pipeline<Shift, RowSum> = Pipeline::new(RowSum::default());
        let result = pipeline.fit(&data(), &[1.0]);
        assert_eq!(
            result,
            Err(PipelineError::LengthMismatch {
                rows: 2,
                targets: 1
            })
        );
    }

    #[test]
    fn test_fit_rejects_non_finite() {
        let mut pipeline: Pipeline<Shift, RowSum> = Pipeline::new(RowSum::default());
        let bad = FeatureMatrix::from_rows(&[vec![1.0, f64::INFINITY]]).unwrap();
        assert!(matches!(
            pipeline.fit(&bad, &[1.0]),
            Err(PipelineError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn test_predict_checks_feature_count() {
        let mut pipeline = Pipeline::new(RowSum::default()).with_step(shift());
        pipeline.fit(&data(), &[0.0, 0.0]).unwrap();
        let wide = FeatureMatrix::from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(
            pipeline.predict(&wide),
            Err(PipelineError::FeatureMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_fitted_pipeline_survives_serde() {
        let mut pipeline = Pipeline::new(RowSum::default()).with_step(shift());
        pipeline.fit(&data(), &[0.0, 0.0]).unwrap();

        let json = serde_json::to_string(&pipeline).unwrap();
        let restored: Pipeline<Shift, RowSum> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            restored.predict(&data()).unwrap(),
            pipeline.predict(&data()).unwrap()
        );
    }
}
