//! Multinomial naive Bayes text engine.
//!
//! Reads the label-prefixed training file directly, so classifiers can be
//! trained without a native fastText library. Options understood:
//!
//! * `label` - label prefix (default `__label__`)
//! * `minCount` - minimum number of occurrences for a token to be kept
//! * `wordNgrams` - maximum length of word n-grams used as features
//! * `smoothing` - additive (Laplace) smoothing constant
//!
//! Any other option is ignored.
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{bail, Result};
use log::{debug, info};

use crate::config::{TrainOptions, LABEL_PREFIX_KEY, RESERVED_INPUT_KEY};
use crate::io::read_training_file;
use crate::models::engine::{Predictions, SupervisedTrainer, TextModel};

const MAX_WORD_NGRAMS: usize = 5;
const KNOWN_OPTIONS: &[&str] = &[LABEL_PREFIX_KEY, "minCount", "wordNgrams", "smoothing"];

#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesParams {
    pub min_count: usize,
    pub word_ngrams: usize,
    pub smoothing: f64,
}

impl Default for NaiveBayesParams {
    fn default() -> Self {
        Self {
            min_count: 1,
            word_ngrams: 1,
            smoothing: 1.0,
        }
    }
}

impl NaiveBayesParams {
    pub fn from_options(options: &TrainOptions) -> Result<Self> {
        let mut params = Self::default();
        if let Some(min_count) = count_option(options, "minCount")? {
            params.min_count = min_count;
        }
        if let Some(ngrams) = count_option(options, "wordNgrams")? {
            if ngrams > MAX_WORD_NGRAMS {
                bail!("wordNgrams must be at most {}, got {}", MAX_WORD_NGRAMS, ngrams);
            }
            params.word_ngrams = ngrams;
        }
        if let Some(value) = options.get("smoothing") {
            let Some(smoothing) = value.as_f64() else {
                bail!("smoothing must be a number, got {}", value);
            };
            if !(smoothing > 0.0) {
                bail!("smoothing must be positive, got {}", smoothing);
            }
            params.smoothing = smoothing;
        }
        for (key, _) in options.iter() {
            if key != RESERVED_INPUT_KEY && !KNOWN_OPTIONS.contains(&key.as_str()) {
                debug!("NaiveBayesTrainer ignores option '{}'", key);
            }
        }
        Ok(params)
    }
}

/// A positive integer option. Integral floats such as `2.0` are accepted.
fn count_option(options: &TrainOptions, key: &str) -> Result<Option<usize>> {
    let Some(value) = options.get(key) else {
        return Ok(None);
    };
    let count = match (value.as_u64(), value.as_f64()) {
        (Some(n), _) => n,
        (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => f as u64,
        _ => bail!("{} must be a positive integer, got {}", key, value),
    };
    if count < 1 {
        bail!("{} must be at least 1, got {}", key, count);
    }
    usize::try_from(count)
        .map(Some)
        .map_err(|_| anyhow::anyhow!("{} is too large: {}", key, count))
}

/// Features of a text: its tokens plus word n-grams up to `max_n`.
fn features(tokens: &[&str], max_n: usize) -> Vec<String> {
    let mut out: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for n in 2..=max_n {
        for window in tokens.windows(n) {
            out.push(window.join(" "));
        }
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct NaiveBayesTrainer;

impl NaiveBayesTrainer {
    pub fn new() -> Self {
        NaiveBayesTrainer
    }
}

impl SupervisedTrainer for NaiveBayesTrainer {
    type Model = NaiveBayesModel;

    fn train(&self, input: &Path, options: &TrainOptions) -> Result<NaiveBayesModel> {
        let params = NaiveBayesParams::from_options(options)?;
        let prefix = options.label_prefix().to_string();
        let lines = read_training_file(input, &prefix)?;

        let mut token_counts: HashMap<String, usize> = HashMap::new();
        let mut examples = Vec::with_capacity(lines.len());
        for line in &lines {
            if line.labels.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.tokens.iter().map(String::as_str).collect();
            let feats = features(&tokens, params.word_ngrams);
            for feat in &feats {
                *token_counts.entry(feat.clone()).or_insert(0) += 1;
            }
            examples.push((&line.labels, feats));
        }
        if examples.is_empty() {
            bail!("No labeled examples in training file {}", input.display());
        }

        let vocabulary: HashSet<String> = token_counts
            .into_iter()
            .filter(|(_, count)| *count >= params.min_count)
            .map(|(feat, _)| feat)
            .collect();

        let mut label_index: HashMap<String, usize> = HashMap::new();
        let mut labels: Vec<String> = Vec::new();
        let mut doc_counts: Vec<f64> = Vec::new();
        let mut feature_counts: Vec<HashMap<String, f64>> = Vec::new();
        let mut totals: Vec<f64> = Vec::new();

        for (line_labels, feats) in &examples {
            for label in line_labels.iter() {
                let token = format!("{}{}", prefix, label);
                let idx = *label_index.entry(token.clone()).or_insert_with(|| {
                    labels.push(token);
                    doc_counts.push(0.0);
                    feature_counts.push(HashMap::new());
                    totals.push(0.0);
                    labels.len() - 1
                });
                doc_counts[idx] += 1.0;
                for feat in feats.iter().filter(|f| vocabulary.contains(*f)) {
                    *feature_counts[idx].entry(feat.clone()).or_insert(0.0) += 1.0;
                    totals[idx] += 1.0;
                }
            }
        }

        let total_docs: f64 = doc_counts.iter().sum();
        let log_priors = doc_counts.iter().map(|c| (c / total_docs).ln()).collect();

        info!(
            "Trained naive Bayes model: {} examples, {} labels, {} features",
            examples.len(),
            labels.len(),
            vocabulary.len()
        );

        Ok(NaiveBayesModel {
            labels,
            log_priors,
            feature_counts,
            totals,
            vocabulary_size: vocabulary.len(),
            params,
        })
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}

/// Trained naive Bayes model. Labels are stored as full prefixed tokens.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    labels: Vec<String>,
    log_priors: Vec<f64>,
    feature_counts: Vec<HashMap<String, f64>>,
    totals: Vec<f64>,
    vocabulary_size: usize,
    params: NaiveBayesParams,
}

impl NaiveBayesModel {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn log_posteriors(&self, text: &str) -> Vec<f64> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let feats = features(&tokens, self.params.word_ngrams);
        let alpha = self.params.smoothing;
        let vocab = self.vocabulary_size.max(1) as f64;

        (0..self.labels.len())
            .map(|idx| {
                let denominator = (self.totals[idx] + alpha * vocab).ln();
                let likelihood: f64 = feats
                    .iter()
                    .filter_map(|feat| {
                        // features unseen in training carry no evidence
                        let known = self.feature_counts.iter().any(|c| c.contains_key(feat));
                        known.then(|| {
                            let count = self.feature_counts[idx].get(feat).copied().unwrap_or(0.0);
                            (count + alpha).ln() - denominator
                        })
                    })
                    .sum();
                self.log_priors[idx] + likelihood
            })
            .collect()
    }
}

impl TextModel for NaiveBayesModel {
    fn predict(&self, text: &str, k: usize) -> Result<Predictions> {
        let log_post = self.log_posteriors(text);
        let max = log_post.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = log_post.iter().map(|lp| (lp - max).exp()).collect();
        let norm: f64 = exp.iter().sum();

        let mut ranked: Vec<(usize, f64)> = exp.iter().map(|e| e / norm).enumerate().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.labels[a.0].cmp(&self.labels[b.0]))
        });
        ranked.truncate(k);

        let labels = ranked.iter().map(|(idx, _)| self.labels[*idx].clone()).collect();
        let scores = ranked.iter().map(|(_, p)| *p as f32).collect();
        Ok(Predictions::new(labels, scores))
    }
}
