use std::path::Path;

use crate::config::TrainOptions;

/// Ranked output of a top-k query: parallel label tokens and scores,
/// highest score first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predictions {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl Predictions {
    pub fn new(labels: Vec<String>, scores: Vec<f32>) -> Self {
        Self { labels, scores }
    }

    pub fn len(&self) -> usize {
        self.labels.len().min(self.scores.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// Best label token, if any.
    pub fn top(&self) -> Option<&str> {
        self.iter().next().map(|(label, _)| label)
    }
}

/// A trained text classification model.
pub trait TextModel {
    /// Return the `k` best labels for `text`.
    fn predict(&self, text: &str, k: usize) -> anyhow::Result<Predictions>;
}

/// Training entry point of a text classification engine.
///
/// `input` is a file in the label-prefixed line format; `options` are the
/// user supplied engine options, forwarded untouched.
pub trait SupervisedTrainer {
    type Model: TextModel;

    fn train(&self, input: &Path, options: &TrainOptions) -> anyhow::Result<Self::Model>;

    fn name(&self) -> &str {
        "trainer"
    }
}
