//! ft-classifiers: supervised-classifier adapters for fastText-style text
//! classification engines.
//!
//! An [`FtClassifier`](models::FtClassifier) exposes `fit` / `predict` /
//! `predict_proba` over tabular input (a positional [`math::Array2`] or a
//! [`table::LabeledTable`]) and integer labels. Training goes through the
//! label-prefixed line format, so any engine implementing
//! [`models::SupervisedTrainer`] can be plugged in. A pure-Rust naive Bayes
//! engine is bundled for use without native dependencies.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod registry;
pub mod strategy;
pub mod table;
