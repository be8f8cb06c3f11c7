use std::error::Error;
use std::fmt;

use crate::data_handling::ElementKind;

pub type Result<T, E = ClassifierError> = std::result::Result<T, E>;

/// Errors raised by the classifier adapters.
#[derive(Debug)]
pub enum ClassifierError {
    /// `X` holds elements that are neither text nor generic objects.
    UnsupportedElementType(ElementKind),
    /// `y` has a rank other than one.
    LabelsNotOneDimensional(usize),
    LengthMismatch { rows: usize, labels: usize },
    EmptyInput,
    NoSuitableColumn,
    ColumnNotFound(String),
    ColumnIndexOutOfBounds { index: usize, ncols: usize },
    /// Prediction was requested before a successful `fit`.
    NotFitted,
    UnparseableLabel(String),
    LabelNotInRegistry(String),
    NoPrediction { row: usize },
    IncompleteProbabilities { row: usize, expected: usize, got: usize },
    Io(std::io::Error),
    /// Failure reported by the training / inference engine, passed through as is.
    Engine(anyhow::Error),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassifierError::UnsupportedElementType(kind) => write!(
                f,
                "Unsupported input element type '{}': X must hold text or generic object values",
                kind
            ),
            ClassifierError::LabelsNotOneDimensional(ndim) => write!(
                f,
                "y must be one-dimensional, got an array with {} dimensions",
                ndim
            ),
            ClassifierError::LengthMismatch { rows, labels } => write!(
                f,
                "X has {} rows but y has {} labels",
                rows, labels
            ),
            ClassifierError::EmptyInput => write!(f, "Cannot fit on an empty training set"),
            ClassifierError::NoSuitableColumn => {
                write!(f, "No suitable column: X has no generic object column")
            }
            ClassifierError::ColumnNotFound(name) => write!(f, "Column '{}' not found in X", name),
            ClassifierError::ColumnIndexOutOfBounds { index, ncols } => write!(
                f,
                "Column index {} is out of bounds for X with {} columns",
                index, ncols
            ),
            ClassifierError::NotFitted => write!(
                f,
                "This classifier is not fitted yet. Call 'fit' before using it for prediction"
            ),
            ClassifierError::UnparseableLabel(label) => {
                write!(f, "Model returned a label that is not an integer class: '{}'", label)
            }
            ClassifierError::LabelNotInRegistry(label) => {
                write!(f, "Label '{}' not found in class registry", label)
            }
            ClassifierError::NoPrediction { row } => {
                write!(f, "Model returned no prediction for row {}", row)
            }
            ClassifierError::IncompleteProbabilities { row, expected, got } => write!(
                f,
                "Model returned {} of {} class probabilities for row {}",
                got, expected, row
            ),
            ClassifierError::Io(err) => write!(f, "Training file IO failed: {}", err),
            ClassifierError::Engine(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for ClassifierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassifierError::Io(err) => Some(err),
            ClassifierError::Engine(err) => err.source(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_display_verbatim() {
        let err = ClassifierError::Engine(anyhow::anyhow!("empty vocabulary"));
        assert_eq!(err.to_string(), "empty vocabulary");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: ClassifierError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("denied"));
    }
}
