//! Bookkeeping for the classes observed during `fit`.
use std::collections::HashMap;

use crate::error::{ClassifierError, Result};
use crate::models::engine::Predictions;

/// Literal token placed before every label in the training file and in
/// engine output.
pub const DEFAULT_LABEL_PREFIX: &str = "__label__";

/// Sorted set of unique labels seen at fit time with their prefixed tokens.
///
/// The sorted order is the column order of `predict_proba`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRegistry {
    prefix: String,
    classes: Vec<i64>,
    class_labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ClassRegistry {
    pub fn from_labels(labels: &[i64], prefix: &str) -> Self {
        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let class_labels: Vec<String> = classes
            .iter()
            .map(|label| format!("{}{}", prefix, label))
            .collect();
        let positions = class_labels
            .iter()
            .enumerate()
            .map(|(idx, token)| (token.clone(), idx))
            .collect();

        Self {
            prefix: prefix.to_string(),
            classes,
            class_labels,
            positions,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn class_labels(&self) -> &[String] {
        &self.class_labels
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Canonical column of a label token, if it was seen at fit time.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.positions.get(token).copied()
    }

    /// Strip the prefix from an engine label token and parse the class.
    pub fn decode(&self, token: &str) -> Result<i64> {
        let class = token
            .strip_prefix(self.prefix.as_str())
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or_else(|| ClassifierError::UnparseableLabel(token.to_string()))?;
        if self.position(token).is_none() {
            return Err(ClassifierError::LabelNotInRegistry(token.to_string()));
        }
        Ok(class)
    }

    /// Reorder one top-k result into canonical class order, keeping the scores.
    pub fn reorder(&self, row: usize, predictions: &Predictions) -> Result<Vec<f32>> {
        let mut probas: Vec<Option<f32>> = vec![None; self.num_classes()];
        for (label, score) in predictions.iter() {
            let idx = self
                .position(label)
                .ok_or_else(|| ClassifierError::LabelNotInRegistry(label.to_string()))?;
            probas[idx] = Some(score);
        }

        let got = probas.iter().filter(|p| p.is_some()).count();
        if got != self.num_classes() {
            return Err(ClassifierError::IncompleteProbabilities {
                row,
                expected: self.num_classes(),
                got,
            });
        }
        Ok(probas.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClassRegistry {
        ClassRegistry::from_labels(&[3, 1, 3, -2, 1], DEFAULT_LABEL_PREFIX)
    }

    #[test]
    fn classes_are_sorted_and_unique() {
        let reg = registry();
        assert_eq!(reg.classes(), &[-2, 1, 3]);
        assert_eq!(
            reg.class_labels(),
            &["__label__-2", "__label__1", "__label__3"]
        );
        assert_eq!(reg.num_classes(), 3);
    }

    #[test]
    fn decode_strips_prefix() {
        let reg = registry();
        assert_eq!(reg.decode("__label__-2").unwrap(), -2);
        assert!(matches!(
            reg.decode("__label__spam"),
            Err(ClassifierError::UnparseableLabel(_))
        ));
        assert!(matches!(
            reg.decode("3"),
            Err(ClassifierError::UnparseableLabel(_))
        ));
        assert!(matches!(
            reg.decode("__label__7"),
            Err(ClassifierError::LabelNotInRegistry(_))
        ));
    }

    #[test]
    fn reorder_follows_sorted_classes() {
        let reg = registry();
        let preds = Predictions::new(
            vec![
                "__label__3".to_string(),
                "__label__-2".to_string(),
                "__label__1".to_string(),
            ],
            vec![0.7, 0.2, 0.1],
        );
        assert_eq!(reg.reorder(0, &preds).unwrap(), vec![0.2, 0.1, 0.7]);
    }

    #[test]
    fn reorder_reports_missing_classes() {
        let reg = registry();
        let preds = Predictions::new(vec!["__label__3".to_string()], vec![0.9]);
        assert!(matches!(
            reg.reorder(4, &preds),
            Err(ClassifierError::IncompleteProbabilities {
                row: 4,
                expected: 3,
                got: 1
            })
        ));

        let preds = Predictions::new(vec!["__label__9".to_string()], vec![1.0]);
        assert!(matches!(
            reg.reorder(0, &preds),
            Err(ClassifierError::LabelNotInRegistry(_))
        ));
    }

    #[test]
    fn custom_prefix() {
        let reg = ClassRegistry::from_labels(&[0, 1], "#");
        assert_eq!(reg.class_labels(), &["#0", "#1"]);
        assert_eq!(reg.decode("#1").unwrap(), 1);
    }
}
