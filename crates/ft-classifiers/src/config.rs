use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::registry::DEFAULT_LABEL_PREFIX;
use crate::strategy::InputColumn;

/// Option key naming the training file. The adapter always sets it itself.
pub const RESERVED_INPUT_KEY: &str = "input";

/// Option key overriding the label prefix.
pub const LABEL_PREFIX_KEY: &str = "label";

/// Free-form engine options, forwarded verbatim to the trainer.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct TrainOptions(BTreeMap<String, JsonValue>);

impl TrainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(JsonValue::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(JsonValue::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(JsonValue::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label prefix shared by the training file and engine output.
    pub fn label_prefix(&self) -> &str {
        self.get_str(LABEL_PREFIX_KEY).unwrap_or(DEFAULT_LABEL_PREFIX)
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for TrainOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Configuration of a classifier adapter.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AdapterConfig {
    pub input_column: InputColumn,
    pub options: TrainOptions,
    /// Directory for training files; the platform temp directory when unset.
    pub temp_dir: Option<PathBuf>,
    /// Keep the training file on disk after `fit` instead of removing it.
    pub keep_training_file: bool,
}

impl AdapterConfig {
    pub fn new(input_column: InputColumn, options: TrainOptions) -> Self {
        Self {
            input_column,
            options,
            ..Default::default()
        }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn keep_training_file(mut self, keep: bool) -> Self {
        self.keep_training_file = keep;
        self
    }

    pub fn training_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Load an adapter configuration from a JSON file.
pub fn load_adapter_config<P: AsRef<Path>>(path: P) -> Result<AdapterConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: AdapterConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_typed_getters() {
        let opts = TrainOptions::new()
            .with("epoch", 25)
            .with("lr", 0.5)
            .with("loss", "softmax");
        assert_eq!(opts.get_i64("epoch"), Some(25));
        assert_eq!(opts.get_f64("lr"), Some(0.5));
        assert_eq!(opts.get_str("loss"), Some("softmax"));
        assert_eq!(opts.get_str("epoch"), None);
        assert_eq!(opts.label_prefix(), DEFAULT_LABEL_PREFIX);
    }

    #[test]
    fn label_option_overrides_prefix() {
        let opts = TrainOptions::new().with(LABEL_PREFIX_KEY, "__class__");
        assert_eq!(opts.label_prefix(), "__class__");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"input_column": {"named": "text"}}"#).unwrap();
        assert_eq!(config.input_column, InputColumn::Named("text".to_string()));
        assert!(config.options.is_empty());
        assert!(!config.keep_training_file);
        assert_eq!(config.training_dir(), std::env::temp_dir());
    }
}
