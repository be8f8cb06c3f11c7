//! Selection of the text column a classifier reads from `X`.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_handling::{ElementKind, TabularInput};
use crate::error::{ClassifierError, Result};

/// Which column of `X` holds the text to classify.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputColumn {
    /// Column at position 0.
    #[default]
    First,
    /// Column at the given position.
    Index(usize),
    /// First column, in declared order, holding generic object values.
    FirstObject,
    /// Column with exactly this label.
    Named(String),
}

impl fmt::Display for InputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputColumn::First => write!(f, "first"),
            InputColumn::Index(idx) => write!(f, "index:{}", idx),
            InputColumn::FirstObject => write!(f, "first_object"),
            InputColumn::Named(name) => write!(f, "name:{}", name),
        }
    }
}

impl FromStr for InputColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(idx) = s.strip_prefix("index:") {
            return idx
                .trim()
                .parse::<usize>()
                .map(InputColumn::Index)
                .map_err(|e| format!("Invalid column index '{}': {}", idx, e));
        }
        if let Some(name) = s.strip_prefix("name:") {
            return Ok(InputColumn::Named(name.to_string()));
        }
        match s.to_lowercase().as_str() {
            "first" => Ok(InputColumn::First),
            "first_object" => Ok(InputColumn::FirstObject),
            _ => Err(format!(
                "Unknown input column selector: {}. Expected one of: first, first_object, index:<n>, name:<column>",
                s
            )),
        }
    }
}

/// Resolve the selector to a column position of `x`.
pub fn resolve_column(strategy: &InputColumn, x: &dyn TabularInput) -> Result<usize> {
    let ncols = x.ncols();
    match strategy {
        InputColumn::First => positional(0, ncols),
        InputColumn::Index(idx) => positional(*idx, ncols),
        InputColumn::FirstObject => (0..ncols)
            .find(|&col| x.column_kind(col) == Some(ElementKind::Object))
            .ok_or(ClassifierError::NoSuitableColumn),
        InputColumn::Named(name) => x
            .column_index(name)
            .ok_or_else(|| ClassifierError::ColumnNotFound(name.clone())),
    }
}

fn positional(index: usize, ncols: usize) -> Result<usize> {
    if index < ncols {
        Ok(index)
    } else {
        Err(ClassifierError::ColumnIndexOutOfBounds { index, ncols })
    }
}

/// Extract the text column of `x`, one entry per row.
pub fn extract_input_column(strategy: &InputColumn, x: &dyn TabularInput) -> Result<Vec<String>> {
    let col = resolve_column(strategy, x)?;
    x.column_texts(col).ok_or(ClassifierError::ColumnIndexOutOfBounds {
        index: col,
        ncols: x.ncols(),
    })
}
