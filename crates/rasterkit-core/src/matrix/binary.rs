//! BinaryMatrix - Matrix constrained to {0, 1}
//!
//! Every morphology operation consumes and produces a `BinaryMatrix`.
//! Values are validated once at construction, so the morphology engine
//! never meets a value outside {0, 1} mid-computation.

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Binary (0/1) matrix
///
/// 1 is foreground, 0 is background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    inner: Matrix<u8>,
}

impl BinaryMatrix {
    /// Create an all-background matrix
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(BinaryMatrix {
            inner: Matrix::new(width, height)?,
        })
    }

    /// Create an all-foreground matrix
    pub fn new_filled(width: u32, height: u32) -> Result<Self> {
        Ok(BinaryMatrix {
            inner: Matrix::new_with_value(width, height, 1)?,
        })
    }

    /// Create a binary matrix from a list of rows
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` for empty or jagged rows and
    /// `Error::InvalidValue` for any value other than 0 or 1.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_matrix(Matrix::from_rows(rows)?)
    }

    /// Validate an existing `Matrix<u8>` as binary
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidValue` naming the first cell whose value is
    /// not 0 or 1.
    pub fn from_matrix(matrix: Matrix<u8>) -> Result<Self> {
        if let Some(idx) = matrix.data().iter().position(|&v| v > 1) {
            let w = matrix.width() as usize;
            return Err(Error::InvalidValue {
                x: (idx % w) as u32,
                y: (idx / w) as u32,
                value: i64::from(matrix.data()[idx]),
            });
        }
        Ok(BinaryMatrix { inner: matrix })
    }

    /// Create a binary matrix from a predicate evaluated at every cell
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Result<Self> {
        Ok(BinaryMatrix {
            inner: Matrix::from_fn(width, height, |x, y| u8::from(f(x, y)))?,
        })
    }

    /// Wrap a matrix produced internally from 0/1 values only.
    pub(crate) fn from_matrix_unchecked(inner: Matrix<u8>) -> Self {
        debug_assert!(inner.data().iter().all(|&v| v <= 1));
        BinaryMatrix { inner }
    }

    /// Get the number of columns
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the number of rows
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// Get the value at (x, y), or `None` if out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.inner.get(x, y)
    }

    /// Check whether (x, y) is an in-bounds foreground cell
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.inner.get(x, y) == Some(1)
    }

    /// Set or clear the cell at (x, y)
    pub fn set(&mut self, x: u32, y: u32, on: bool) -> Result<()> {
        self.inner.set(x, y, u8::from(on))
    }

    /// Borrow the underlying `Matrix<u8>`
    pub fn as_matrix(&self) -> &Matrix<u8> {
        &self.inner
    }

    /// Consume into the underlying `Matrix<u8>`
    pub fn into_matrix(self) -> Matrix<u8> {
        self.inner
    }

    /// Copy the matrix out as a list of rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.inner.to_rows()
    }

    /// Count foreground cells
    pub fn count_foreground(&self) -> usize {
        self.inner.data().iter().filter(|&&v| v == 1).count()
    }

    /// Complement: swap foreground and background
    pub fn invert(&self) -> Self {
        Self::from_matrix_unchecked(self.inner.map(|&v| 1 - v))
    }

    /// Cell-wise `self AND NOT other`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the matrices differ in size.
    pub fn and_not(&self, other: &BinaryMatrix) -> Result<Self> {
        self.check_same_shape(other)?;
        let data = self
            .inner
            .data()
            .iter()
            .zip(other.inner.data())
            .map(|(&a, &b)| a & (1 - b))
            .collect();
        let (w, h) = self.dimensions();
        Ok(Self::from_matrix_unchecked(Matrix::from_parts(w, h, data)))
    }

    /// Check that every foreground cell of `self` is foreground in `other`
    ///
    /// Matrices of different sizes are never subsets of each other.
    pub fn is_subset_of(&self, other: &BinaryMatrix) -> bool {
        self.same_shape(other)
            && self
                .inner
                .data()
                .iter()
                .zip(other.inner.data())
                .all(|(&a, &b)| a <= b)
    }

    /// Check whether `other` has the same width and height
    #[inline]
    pub fn same_shape(&self, other: &BinaryMatrix) -> bool {
        self.inner.same_shape(&other.inner)
    }

    fn check_same_shape(&self, other: &BinaryMatrix) -> Result<()> {
        if !self.same_shape(other) {
            let (w1, h1) = self.dimensions();
            let (w2, h2) = other.dimensions();
            return Err(Error::ShapeMismatch(format!(
                "binary matrices differ in size: {w1}x{h1} vs {w2}x{h2}"
            )));
        }
        Ok(())
    }
}

impl TryFrom<Matrix<u8>> for BinaryMatrix {
    type Error = Error;

    fn try_from(matrix: Matrix<u8>) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl From<BinaryMatrix> for Matrix<u8> {
    fn from(bin: BinaryMatrix) -> Self {
        bin.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_non_binary() {
        let err = BinaryMatrix::from_rows(vec![vec![0, 1], vec![2, 0]]).unwrap_err();
        match err {
            Error::InvalidValue { x, y, value } => {
                assert_eq!((x, y, value), (0, 1, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_rows_rejects_jagged() {
        let err = BinaryMatrix::from_rows(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn test_invert() {
        let bin = BinaryMatrix::from_rows(vec![vec![0, 1], vec![1, 1]]).unwrap();
        let inv = bin.invert();
        assert_eq!(inv.to_rows(), vec![vec![1, 0], vec![0, 0]]);
        assert_eq!(inv.invert(), bin);
    }

    #[test]
    fn test_and_not() {
        let a = BinaryMatrix::from_rows(vec![vec![1, 1, 0]]).unwrap();
        let b = BinaryMatrix::from_rows(vec![vec![0, 1, 1]]).unwrap();
        assert_eq!(a.and_not(&b).unwrap().to_rows(), vec![vec![1, 0, 0]]);

        let c = BinaryMatrix::new(2, 1).unwrap();
        assert!(a.and_not(&c).is_err());
    }

    #[test]
    fn test_subset_and_count() {
        let a = BinaryMatrix::from_rows(vec![vec![0, 1], vec![0, 0]]).unwrap();
        let b = BinaryMatrix::from_rows(vec![vec![1, 1], vec![0, 1]]).unwrap();
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert_eq!(b.count_foreground(), 3);
        assert!(b.is_set(1, 1));
        assert!(!b.is_set(0, 1));
        assert!(!b.is_set(5, 5));
    }
}
