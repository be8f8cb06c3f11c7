//! CSV / TSV reader producing a [`LabeledTable`].
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::data_handling::Value;
use crate::math::Array1;
use crate::table::{ColumnData, LabeledTable};

/// A table split into features and an integer label column.
#[derive(Debug)]
pub struct LabeledData {
    pub x: LabeledTable,
    pub y: Array1<i64>,
}

fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

/// Read a delimited file with a header row. `.tsv` files are tab separated,
/// everything else comma separated.
///
/// Column types are inferred: integer, float and boolean columns keep their
/// type, any other column becomes a generic object column.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<LabeledTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open table: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read header row")?
        .clone();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        for (col, values) in cells.iter_mut().enumerate() {
            let value = record
                .get(col)
                .ok_or_else(|| anyhow!("Missing value in column {} at row {}", col + 1, row_idx + 1))?;
            values.push(value.to_string());
        }
    }

    let mut table = LabeledTable::new();
    for (name, values) in headers.iter().zip(cells) {
        let data = infer_column(values);
        debug!("Column '{}' inferred as {}", name, data.kind());
        table
            .push_column(name, data)
            .with_context(|| format!("Invalid column '{}'", name))?;
    }
    Ok(table)
}

/// Read a table and split out `label_column` as integer labels.
pub fn read_labeled_csv<P: AsRef<Path>>(path: P, label_column: &str) -> Result<LabeledData> {
    let path = path.as_ref();
    let mut x = read_table(path)?;
    let column = x
        .take_column(label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}' in {}", label_column, path.display()))?;

    let y = match column.data {
        ColumnData::Int(values) => Array1::from_vec(values),
        other => {
            return Err(anyhow!(
                "Label column '{}' must hold integers, found {} values",
                label_column,
                other.kind()
            ))
        }
    };
    Ok(LabeledData { x, y })
}

fn infer_column(values: Vec<String>) -> ColumnData {
    if values.is_empty() {
        return ColumnData::Object(Vec::new());
    }
    if let Some(ints) = parse_all(&values, |v| v.parse::<i64>().ok()) {
        return ColumnData::Int(ints);
    }
    if let Some(floats) = parse_all(&values, |v| v.parse::<f64>().ok()) {
        return ColumnData::Float(floats);
    }
    if let Some(bools) = parse_all(&values, parse_bool) {
        return ColumnData::Bool(bools);
    }
    ColumnData::Object(
        values
            .into_iter()
            .map(|v| if v.is_empty() { Value::Null } else { Value::Text(v) })
            .collect(),
    )
}

fn parse_all<T, F>(values: &[String], parse: F) -> Option<Vec<T>>
where
    F: Fn(&str) -> Option<T>,
{
    values.iter().map(|v| parse(v.trim())).collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_handling::{ElementKind, TabularInput};
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn infers_column_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "reviews.csv",
            "id,text,score,flag\n1,good movie,0.5,true\n2,bad,1.5,false\n",
        );
        let table = read_table(&path).unwrap();
        assert_eq!(table.column_names(), vec!["id", "text", "score", "flag"]);
        assert_eq!(table.column_kind(0), Some(ElementKind::Int));
        assert_eq!(table.column_kind(1), Some(ElementKind::Object));
        assert_eq!(table.column_kind(2), Some(ElementKind::Float));
        assert_eq!(table.column_kind(3), Some(ElementKind::Bool));
        assert_eq!(table.column_texts(1).unwrap(), vec!["good movie", "bad"]);
    }

    #[test]
    fn splits_label_column_from_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "train.tsv", "label\ttext\n1\tgood\n0\tbad\n");
        let data = read_labeled_csv(&path, "label").unwrap();
        assert_eq!(data.y.to_vec(), vec![1, 0]);
        assert_eq!(data.x.column_names(), vec!["text"]);
    }

    #[test]
    fn non_integer_labels_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "train.csv", "label,text\npos,good\n");
        assert!(read_labeled_csv(&path, "label").is_err());
        assert!(read_labeled_csv(&path, "target").is_err());
    }
}
