//! Model module - the attrition classifier

pub mod forest;
pub mod metrics;
pub mod tree;

pub use forest::*;
pub use metrics::*;
pub use tree::{DecisionTree, Node, NodeIndex, TreeConfig};

/// A fitted binary classifier over fixed-width numeric rows
pub trait Classifier: Send + Sync {
    /// Probability that the row belongs to class 1
    fn predict_proba(&self, row: &[f64]) -> f64;

    /// Predicted class: 1 when the class-1 probability exceeds one half
    fn predict(&self, row: &[f64]) -> u8 {
        u8::from(self.predict_proba(row) > 0.5)
    }

    /// One non-negative score per input column
    fn feature_importances(&self) -> Vec<f64>;

    /// Expected row width
    fn n_features(&self) -> usize;
}
