//! Positional array containers.
//!
//! `Array2` is the row-major "positional array" form of `X` (columns have no
//! names, every element shares one type) and `Array1` holds label vectors.
//! Both are deliberately small and dependency-free.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
