//! Label-prefixed line format read by fastText-style trainers.
//!
//! One example per line: `<prefix><label> <text>\n`. Text containing the
//! prefix token makes the line ambiguous to the trainer; it is written as is.
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::data_handling::LabeledExample;

/// A parsed training line: its label tokens (without prefix) and text tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrainingLine {
    pub labels: Vec<String>,
    pub tokens: Vec<String>,
}

pub fn format_line(example: &LabeledExample<'_>, prefix: &str) -> String {
    format!("{}{} {}\n", prefix, example.label, example.text)
}

/// Write one line per example and return the number of lines written.
pub fn write_training_file<W: Write>(
    writer: &mut W,
    texts: &[String],
    labels: &[i64],
    prefix: &str,
) -> std::io::Result<usize> {
    let mut written = 0;
    for (row, (text, &label)) in texts.iter().zip(labels).enumerate() {
        if text.contains(prefix) || text.contains('\n') {
            warn!(
                "Text of example {} contains the label prefix '{}' or a line break; it is written verbatim",
                row, prefix
            );
        }
        let example = LabeledExample::new(text, label);
        writer.write_all(format_line(&example, prefix).as_bytes())?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Split a training line into label tokens and text tokens.
pub fn parse_line(line: &str, prefix: &str) -> TrainingLine {
    let mut parsed = TrainingLine::default();
    for token in line.split_whitespace() {
        match token.strip_prefix(prefix) {
            Some(label) if !prefix.is_empty() => parsed.labels.push(label.to_string()),
            _ => parsed.tokens.push(token.to_string()),
        }
    }
    parsed
}

/// Read a training file, skipping blank lines.
pub fn read_training_file<P: AsRef<Path>>(path: P, prefix: &str) -> Result<Vec<TrainingLine>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open training file: {}", path.as_ref().display()))?;
    let mut lines = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        lines.push(parse_line(&line, prefix));
    }
    Ok(lines)
}
