//! Classifier adapter over a fastText-style text classification engine.
//!
//! `fit` writes the selected text column of `X` and the labels `y` to a
//! label-prefixed training file, trains the engine on it and keeps the model
//! together with the [`ClassRegistry`] of observed classes. Prediction
//! queries the model row by row and decodes its label tokens.
use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{AdapterConfig, TrainOptions, RESERVED_INPUT_KEY};
use crate::data_handling::{LabelArray, TabularInput};
use crate::error::{ClassifierError, Result};
use crate::io::write_training_file;
use crate::models::classifier_trait::Classifier;
use crate::models::engine::{Predictions, SupervisedTrainer, TextModel};
use crate::registry::ClassRegistry;
use crate::strategy::{extract_input_column, InputColumn};

const TRAINING_FILE_PREFIX: &str = "ft_trainset_";
const TRAINING_FILE_SUFFIX: &str = ".ft";

struct Fitted<M> {
    model: M,
    registry: ClassRegistry,
}

pub struct FtClassifier<T: SupervisedTrainer> {
    trainer: T,
    config: AdapterConfig,
    fitted: Option<Fitted<T::Model>>,
    training_file: Option<PathBuf>,
}

impl<T: SupervisedTrainer> FtClassifier<T> {
    /// The reserved `input` option is dropped; the adapter sets the training
    /// file itself.
    pub fn new(mut config: AdapterConfig, trainer: T) -> Self {
        if config.options.remove(RESERVED_INPUT_KEY).is_some() {
            debug!("Dropping reserved '{}' option from trainer options", RESERVED_INPUT_KEY);
        }
        FtClassifier {
            trainer,
            config,
            fitted: None,
            training_file: None,
        }
    }

    /// Reads the text from column 0 of a positional array.
    pub fn first_col(trainer: T, options: TrainOptions) -> Self {
        Self::new(AdapterConfig::new(InputColumn::First, options), trainer)
    }

    /// Reads the text from the column at `input_ix`.
    pub fn idx_based(trainer: T, input_ix: usize, options: TrainOptions) -> Self {
        Self::new(AdapterConfig::new(InputColumn::Index(input_ix), options), trainer)
    }

    /// Reads the text from the first generic object column of a labeled table.
    pub fn first_obj(trainer: T, options: TrainOptions) -> Self {
        Self::new(AdapterConfig::new(InputColumn::FirstObject, options), trainer)
    }

    /// Reads the text from the column labeled `input_col_lbl`.
    pub fn col_lbl_based(trainer: T, input_col_lbl: impl Into<String>, options: TrainOptions) -> Self {
        Self::new(
            AdapterConfig::new(InputColumn::Named(input_col_lbl.into()), options),
            trainer,
        )
    }

    pub fn trainer(&self) -> &T {
        &self.trainer
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn options(&self) -> &TrainOptions {
        &self.config.options
    }

    pub fn input_column(&self) -> &InputColumn {
        &self.config.input_column
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn registry(&self) -> Option<&ClassRegistry> {
        self.fitted.as_ref().map(|f| &f.registry)
    }

    pub fn model(&self) -> Option<&T::Model> {
        self.fitted.as_ref().map(|f| &f.model)
    }

    /// Path of the last training file, when it was kept on disk.
    pub fn training_file(&self) -> Option<&Path> {
        self.training_file.as_deref()
    }

    fn validate_x(x: &dyn TabularInput) -> Result<()> {
        let kind = x.element_kind();
        if !kind.is_text_like() {
            return Err(ClassifierError::UnsupportedElementType(kind));
        }
        Ok(())
    }

    fn validate_y(y: &dyn LabelArray) -> Result<Vec<i64>> {
        let ndim = y.ndim();
        if ndim != 1 {
            return Err(ClassifierError::LabelsNotOneDimensional(ndim));
        }
        Ok(y.to_labels())
    }

    fn fit_inner(&mut self, x: &dyn TabularInput, y: &dyn LabelArray) -> Result<()> {
        Self::validate_x(x)?;
        let labels = Self::validate_y(y)?;
        if labels.len() != x.nrows() {
            return Err(ClassifierError::LengthMismatch {
                rows: x.nrows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }
        let texts = extract_input_column(&self.config.input_column, x)?;

        let prefix = self.config.options.label_prefix().to_string();
        let registry = ClassRegistry::from_labels(&labels, &prefix);
        info!(
            "Fitting {} on {} examples with {} classes",
            self.trainer.name(),
            labels.len(),
            registry.num_classes()
        );

        let dir = self.config.training_dir();
        fs::create_dir_all(&dir)?;
        let mut temp = tempfile::Builder::new()
            .prefix(TRAINING_FILE_PREFIX)
            .suffix(TRAINING_FILE_SUFFIX)
            .tempfile_in(&dir)?;
        let mut writer = BufWriter::new(temp.as_file_mut());
        let written = write_training_file(&mut writer, &texts, &labels, &prefix)?;
        drop(writer);
        debug!("Wrote {} examples to {}", written, temp.path().display());

        let trained = self.trainer.train(temp.path(), &self.config.options);

        self.training_file = if self.config.keep_training_file {
            let (_, path) = temp.keep().map_err(|e| ClassifierError::Io(e.error))?;
            debug!("Keeping training file {}", path.display());
            Some(path)
        } else {
            temp.close()?;
            None
        };

        let model = trained.map_err(ClassifierError::Engine)?;
        self.fitted = Some(Fitted { model, registry });
        Ok(())
    }

    fn query(&self, x: &dyn TabularInput, k: usize) -> Result<(&ClassRegistry, Vec<Predictions>)> {
        let fitted = self.fitted.as_ref().ok_or(ClassifierError::NotFitted)?;
        Self::validate_x(x)?;
        let texts = extract_input_column(&self.config.input_column, x)?;
        let predictions = texts
            .iter()
            .map(|text| fitted.model.predict(text, k).map_err(ClassifierError::Engine))
            .collect::<Result<Vec<_>>>()?;
        Ok((&fitted.registry, predictions))
    }
}

impl<T: SupervisedTrainer> fmt::Debug for FtClassifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtClassifier")
            .field("trainer", &self.trainer.name())
            .field("config", &self.config)
            .field("classes", &self.classes())
            .field("training_file", &self.training_file)
            .finish()
    }
}

impl<T: SupervisedTrainer> Classifier for FtClassifier<T> {
    fn fit(&mut self, x: &dyn TabularInput, y: &dyn LabelArray) -> Result<&mut Self> {
        // a failed refit leaves the adapter unfitted
        self.fitted = None;
        self.fit_inner(x, y)?;
        Ok(self)
    }

    fn predict(&self, x: &dyn TabularInput) -> Result<Vec<i64>> {
        let (registry, predictions) = self.query(x, 1)?;
        predictions
            .iter()
            .enumerate()
            .map(|(row, preds)| {
                let top = preds.top().ok_or(ClassifierError::NoPrediction { row })?;
                registry.decode(top)
            })
            .collect()
    }

    fn predict_proba(&self, x: &dyn TabularInput) -> Result<Vec<Vec<f32>>> {
        let k = self
            .registry()
            .ok_or(ClassifierError::NotFitted)?
            .num_classes();
        let (registry, predictions) = self.query(x, k)?;
        predictions
            .iter()
            .enumerate()
            .map(|(row, preds)| registry.reorder(row, preds))
            .collect()
    }

    fn classes(&self) -> Option<&[i64]> {
        self.registry().map(ClassRegistry::classes)
    }

    fn name(&self) -> &str {
        self.trainer.name()
    }
}
