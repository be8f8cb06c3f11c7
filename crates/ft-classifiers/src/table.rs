//! Labeled tables: named, individually typed columns in declared order.
use std::fmt;

use crate::data_handling::{ElementKind, TabularInput, Value};

/// Values of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Object(Vec<Value>),
    Int(Vec<i64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Object(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ColumnData::Object(_) => ElementKind::Object,
            ColumnData::Int(_) => ElementKind::Int,
            ColumnData::Float(_) => ElementKind::Float,
            ColumnData::Bool(_) => ElementKind::Bool,
        }
    }

    pub fn texts(&self) -> Vec<String> {
        match self {
            ColumnData::Object(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnData::Int(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnData::Float(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnData::Bool(v) => v.iter().map(|x| x.to_string()).collect(),
        }
    }
}

impl From<Vec<Value>> for ColumnData {
    fn from(values: Vec<Value>) -> Self {
        ColumnData::Object(values)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::Object(values.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(values: Vec<String>) -> Self {
        ColumnData::Object(values.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(values: Vec<i64>) -> Self {
        ColumnData::Int(values)
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(values: Vec<f64>) -> Self {
        ColumnData::Float(values)
    }
}

impl From<Vec<bool>> for ColumnData {
    fn from(values: Vec<bool>) -> Self {
        ColumnData::Bool(values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Column-oriented table where every column carries a name and a type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabeledTable {
    columns: Vec<Column>,
    rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    DuplicateColumn(String),
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateColumn(name) => write!(f, "duplicate column '{}'", name),
            TableError::LengthMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "column '{}' has {} rows, expected {}",
                column, found, expected
            ),
        }
    }
}

impl std::error::Error for TableError {}

impl LabeledTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<Self, TableError> {
        self.push_column(name, data)?;
        Ok(self)
    }

    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<(), TableError> {
        let name = name.into();
        let data = data.into();
        if self.columns.iter().any(|c| c.name == name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.rows = data.len();
        } else if data.len() != self.rows {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.rows,
                found: data.len(),
            });
        }
        self.columns.push(Column { name, data });
        Ok(())
    }

    /// Remove a column by name, returning it.
    pub fn take_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        let column = self.columns.remove(idx);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        Some(column)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl TabularInput for LabeledTable {
    fn nrows(&self) -> usize {
        self.rows
    }

    fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Common kind of all columns. Int and Float columns together widen to
    /// `Float`; any other mix collapses to `Object`.
    fn element_kind(&self) -> ElementKind {
        let mut kinds = self.columns.iter().map(|c| c.data.kind());
        let Some(first) = kinds.next() else {
            return ElementKind::Object;
        };
        kinds.fold(first, |acc, kind| match (acc, kind) {
            (a, b) if a == b => a,
            (ElementKind::Int, ElementKind::Float) | (ElementKind::Float, ElementKind::Int) => {
                ElementKind::Float
            }
            _ => ElementKind::Object,
        })
    }

    fn column_kind(&self, col: usize) -> Option<ElementKind> {
        self.columns.get(col).map(|c| c.data.kind())
    }

    fn column_name(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(|c| c.name.as_str())
    }

    fn column_texts(&self, col: usize) -> Option<Vec<String>> {
        self.columns.get(col).map(|c| c.data.texts())
    }
}
