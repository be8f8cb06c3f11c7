pub mod classifier_trait;
pub mod engine;
pub mod factory;
pub mod ft_classifier;
pub mod naive_bayes;

pub use classifier_trait::Classifier;
pub use engine::{Predictions, SupervisedTrainer, TextModel};
pub use ft_classifier::FtClassifier;
pub use naive_bayes::{NaiveBayesModel, NaiveBayesTrainer};
