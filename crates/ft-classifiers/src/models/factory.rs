use crate::config::AdapterConfig;
use crate::models::engine::SupervisedTrainer;
use crate::models::ft_classifier::FtClassifier;
use crate::models::naive_bayes::NaiveBayesTrainer;

/// Build a classifier adapter from an `AdapterConfig` and an engine.
pub fn build_classifier<T: SupervisedTrainer>(config: AdapterConfig, trainer: T) -> FtClassifier<T> {
    FtClassifier::new(config, trainer)
}

/// Build a classifier adapter backed by the built-in naive Bayes engine.
pub fn build_naive_bayes_classifier(config: AdapterConfig) -> FtClassifier<NaiveBayesTrainer> {
    FtClassifier::new(config, NaiveBayesTrainer::new())
}
