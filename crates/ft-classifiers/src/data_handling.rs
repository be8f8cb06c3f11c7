//! Input data model shared by the classifier adapters.
//!
//! `X` is anything implementing [`TabularInput`]: the positional
//! [`Array2`] (unnamed columns, one element type) or a
//! [`LabeledTable`](crate::table::LabeledTable) (named, individually typed
//! columns). `y` is anything implementing [`LabelArray`].
use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{Array1, Array2};

/// Element type of a column, or of a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Plain text elements (`String`, `&str`).
    Text,
    /// Generic dynamic values ([`Value`]).
    Object,
    Int,
    Float,
    Bool,
}

impl ElementKind {
    /// Only text and generic object elements can be fed to a text classifier.
    pub fn is_text_like(self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::Object)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Object => "object",
            ElementKind::Int => "int",
            ElementKind::Float => "float",
            ElementKind::Bool => "bool",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generic, dynamically typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// An element type that can live in an `Array2` handed to a classifier.
pub trait Element {
    const KIND: ElementKind;

    fn to_text(&self) -> Cow<'_, str>;
}

impl Element for String {
    const KIND: ElementKind = ElementKind::Text;

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Element for &str {
    const KIND: ElementKind = ElementKind::Text;

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Element for Value {
    const KIND: ElementKind = ElementKind::Object;

    fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(v) => Cow::Borrowed(v),
            other => Cow::Owned(other.to_string()),
        }
    }
}

macro_rules! impl_display_element {
    ($kind:expr => $($t:ty),+) => {
        $(
            impl Element for $t {
                const KIND: ElementKind = $kind;

                fn to_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

impl_display_element!(ElementKind::Int => i8, i16, i32, i64, u8, u16, u32, u64, usize);
impl_display_element!(ElementKind::Float => f32, f64);
impl_display_element!(ElementKind::Bool => bool);

/// Rectangular feature table `X` (n rows x m columns).
pub trait TabularInput {
    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Element type of the table as a whole.
    fn element_kind(&self) -> ElementKind;

    fn column_kind(&self, col: usize) -> Option<ElementKind>;

    /// Column label; positional inputs have none.
    fn column_name(&self, col: usize) -> Option<&str>;

    /// Text form of every value in a column, in row order.
    fn column_texts(&self, col: usize) -> Option<Vec<String>>;

    fn column_index(&self, name: &str) -> Option<usize> {
        (0..self.ncols()).find(|&col| self.column_name(col) == Some(name))
    }
}

impl<T: Element> TabularInput for Array2<T> {
    fn nrows(&self) -> usize {
        Array2::nrows(self)
    }

    fn ncols(&self) -> usize {
        Array2::ncols(self)
    }

    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn column_kind(&self, col: usize) -> Option<ElementKind> {
        (col < Array2::ncols(self)).then_some(T::KIND)
    }

    fn column_name(&self, _col: usize) -> Option<&str> {
        None
    }

    fn column_texts(&self, col: usize) -> Option<Vec<String>> {
        self.column_iter(col)
            .map(|values| values.map(|v| v.to_text().into_owned()).collect())
    }
}

/// Target vector `y`. Must be one-dimensional to be accepted by `fit`.
pub trait LabelArray {
    fn ndim(&self) -> usize;

    /// Labels in row-major order.
    fn to_labels(&self) -> Vec<i64>;
}

impl<T: Copy + Into<i64>> LabelArray for [T] {
    fn ndim(&self) -> usize {
        1
    }

    fn to_labels(&self) -> Vec<i64> {
        self.iter().map(|&v| v.into()).collect()
    }
}

impl<T: Copy + Into<i64>, const N: usize> LabelArray for [T; N] {
    fn ndim(&self) -> usize {
        1
    }

    fn to_labels(&self) -> Vec<i64> {
        self.as_slice().to_labels()
    }
}

impl<T: Copy + Into<i64>> LabelArray for Vec<T> {
    fn ndim(&self) -> usize {
        1
    }

    fn to_labels(&self) -> Vec<i64> {
        self.as_slice().to_labels()
    }
}

impl<T: Copy + Into<i64>> LabelArray for Array1<T> {
    fn ndim(&self) -> usize {
        1
    }

    fn to_labels(&self) -> Vec<i64> {
        self.as_slice().to_labels()
    }
}

impl<T: Copy + Into<i64>> LabelArray for Array2<T> {
    fn ndim(&self) -> usize {
        2
    }

    fn to_labels(&self) -> Vec<i64> {
        self.as_slice().to_labels()
    }
}

/// One training example, alive only while its line is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledExample<'a> {
    pub text: &'a str,
    pub label: i64,
}

impl<'a> LabeledExample<'a> {
    pub fn new(text: &'a str, label: i64) -> Self {
        Self { text, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_kind_follows_element_type() {
        let text = Array2::from_rows(vec![vec!["a".to_string()]]).unwrap();
        let ints = Array2::from_rows(vec![vec![1i64]]).unwrap();
        let objects = Array2::from_rows(vec![vec![Value::from("a")]]).unwrap();
        assert_eq!(text.element_kind(), ElementKind::Text);
        assert_eq!(ints.element_kind(), ElementKind::Int);
        assert_eq!(objects.element_kind(), ElementKind::Object);
        assert!(!ints.element_kind().is_text_like());
    }

    #[test]
    fn object_values_render_as_text() {
        let x = Array2::from_rows(vec![vec![Value::from("hi"), Value::Int(3), Value::Null]])
            .unwrap();
        assert_eq!(x.column_texts(0).unwrap(), vec!["hi"]);
        assert_eq!(x.column_texts(1).unwrap(), vec!["3"]);
        assert_eq!(x.column_texts(2).unwrap(), vec![""]);
        assert!(x.column_texts(3).is_none());
    }

    #[test]
    fn label_array_ranks() {
        let flat = vec![1i32, 0, 1];
        let column = Array2::from_shape_vec((3, 1), vec![1i64, 0, 1]).unwrap();
        assert_eq!(flat.ndim(), 1);
        assert_eq!(flat.to_labels(), vec![1, 0, 1]);
        assert_eq!(column.ndim(), 2);
    }
}
