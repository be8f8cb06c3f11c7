use std::error::Error;
use std::fmt;
use std::ops::Index;

use crate::math::vector::Array1;

/// Row-major two-dimensional array.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build from nested rows. Every row must have the width of the first one.
    pub fn from_rows<R>(rows: Vec<R>) -> Result<Self, ShapeError>
    where
        R: IntoIterator<Item = T>,
    {
        let nrows = rows.len();
        let mut cols = None;
        let mut data = Vec::new();
        for (idx, row) in rows.into_iter().enumerate() {
            let before = data.len();
            data.extend(row);
            let width = data.len() - before;
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(ShapeError::RaggedRow {
                        row: idx,
                        expected,
                        found: width,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: cols.unwrap_or(0),
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Iterate over the values of one column, or `None` when out of range.
    pub fn column_iter(&self, col: usize) -> Option<impl Iterator<Item = &T> + '_> {
        if col >= self.cols {
            return None;
        }
        Some((0..self.rows).map(move |row| &self.data[self.offset(row, col)]))
    }

    pub fn column(&self, col: usize) -> Option<Array1<T>>
    where
        T: Clone,
    {
        self.column_iter(col).map(|values| values.cloned().collect())
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    BufferLength { rows: usize, cols: usize, len: usize },
    RaggedRow { row: usize, expected: usize, found: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, found, expected
            ),
        }
    }
}

impl Error for ShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_is_row_major() {
        let x = Array2::from_rows(vec![vec!["a", "x"], vec!["b", "y"]]).unwrap();
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(x[(1, 0)], "b");
        assert_eq!(x.column(1).unwrap().to_vec(), vec!["x", "y"]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Array2::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn column_out_of_range_is_none() {
        let x = Array2::from_shape_vec((1, 2), vec![1, 2]).unwrap();
        assert!(x.column(2).is_none());
    }
}
