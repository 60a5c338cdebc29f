//! Matrix - Rectangular row-major grid
//!
//! `Matrix<T>` is the value type every filtering and morphology operation
//! consumes and produces. A constructed matrix is always non-empty and
//! rectangular, so operations never need to re-check their input shape.
//!
//! See [`binary`] for the 0/1-constrained variant and [`serial`] for the
//! text serialization format.
//!
//! # Examples
//!
//! ```
//! use rasterkit_core::ScalarMatrix;
//!
//! let m = ScalarMatrix::from_rows(vec![
//!     vec![1.0, 2.0, 3.0],
//!     vec![4.0, 5.0, 6.0],
//! ])
//! .unwrap();
//! assert_eq!(m.dimensions(), (3, 2));
//! assert_eq!(m.get(2, 1), Some(6.0));
//! ```

pub mod binary;
pub mod serial;

use crate::error::{Error, Result};

/// Rectangular grid of values
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The value at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    /// Number of columns
    width: u32,
    /// Number of rows
    height: u32,
    /// Values (row-major, no padding)
    data: Vec<T>,
}

/// Floating-point matrix used as convolution input and output
pub type ScalarMatrix = Matrix<f64>;

impl<T: Clone> Matrix<T> {
    /// Create a new matrix with every cell set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        check_dimensions(width, height)?;
        let size = width as usize * height as usize;
        Ok(Matrix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a matrix from a list of rows
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if there are no rows, the first row
    /// is empty, or any row differs in length from the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(Error::ShapeMismatch(format!(
                "matrix must have at least one row and one column, got {height} rows of width {width}"
            )));
        }
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(Error::ShapeMismatch(format!(
                "row {y} has length {} but row 0 has length {width}",
                rows[y].len()
            )));
        }

        let data = rows.into_iter().flatten().collect();
        Ok(Matrix {
            width: to_dim(width)?,
            height: to_dim(height)?,
            data,
        })
    }

    /// Copy the matrix out as a list of rows
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data
            .chunks_exact(self.width as usize)
            .map(<[T]>::to_vec)
            .collect()
    }
}

impl<T: Clone + Default> Matrix<T> {
    /// Create a new matrix with every cell set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, T::default())
    }
}

impl<T> Matrix<T> {
    /// Create a matrix from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are zero or the data length does not
    /// equal `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::ShapeMismatch(format!(
                "data length {} doesn't match {width}x{height} = {expected}",
                data.len()
            )));
        }
        Ok(Matrix {
            width,
            height,
            data,
        })
    }

    /// Create a matrix by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Result<Self> {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Matrix {
            width,
            height,
            data,
        })
    }

    /// Build a matrix whose shape is already known to be valid.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Matrix {
            width,
            height,
            data,
        }
    }

    /// Get the number of columns
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the number of rows
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether `other` has the same width and height
    #[inline]
    pub fn same_shape<U>(&self, other: &Matrix<U>) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Get the raw row-major data
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning its row-major data
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Get row `y` as a slice
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// Apply `f` to every cell, producing a matrix of the same shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix::from_parts(self.width, self.height, self.data.iter().map(f).collect())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl<T: Copy> Matrix<T> {
    /// Get the value at (x, y), or `None` if out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get the value at (x, y) without bounds checking against the width
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> T {
        self.data[self.index(x, y)]
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if (x, y) is outside the matrix.
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

fn to_dim(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| Error::ShapeMismatch(format!("dimension {len} exceeds u32::MAX")))
}
