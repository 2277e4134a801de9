//! Train/test split model.

use pipeline_spi::FeatureMatrix;
use serde::{Deserialize, Serialize};

/// Features and targets for the training and held-out partitions.
///
/// Both matrices share `feature_names` as their column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub x_train: FeatureMatrix,
    pub x_test: FeatureMatrix,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

impl TrainTestSplit {
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn train_len(&self) -> usize {
        self.y_train.len()
    }

    pub fn test_len(&self) -> usize {
        self.y_test.len()
    }
}

/// What a preparation run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_names: Vec<String>,
    pub target_name: String,
}
