//! IO utilities: the training-file format and delimited table loading.

pub mod csv_table;
pub mod fasttext_format;

pub use csv_table::{read_labeled_csv, read_table, LabeledData};
pub use fasttext_format::{
    format_line, parse_line, read_training_file, write_training_file, TrainingLine,
};
