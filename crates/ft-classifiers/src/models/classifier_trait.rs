use crate::data_handling::{LabelArray, TabularInput};
use crate::error::Result;

/// Standard supervised-classifier contract, so text classifiers can be
/// swapped with any other classifier in a pipeline.
pub trait Classifier {
    /// Fit the classifier on `x` (n rows) and `y` (n integer labels).
    /// Returns `self` so calls can be chained.
    fn fit(&mut self, x: &dyn TabularInput, y: &dyn LabelArray) -> Result<&mut Self>;

    /// One predicted class per row of `x`, in row order.
    fn predict(&self, x: &dyn TabularInput) -> Result<Vec<i64>>;

    /// One probability vector per row of `x`; columns follow [`Classifier::classes`].
    fn predict_proba(&self, x: &dyn TabularInput) -> Result<Vec<Vec<f32>>>;

    /// Sorted classes seen during `fit`, `None` before fitting.
    fn classes(&self) -> Option<&[i64]>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
