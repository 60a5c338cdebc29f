//! Convolution kernels
//!
//! A kernel is a rectangular grid of weights. Its center is fixed at
//! `(width / 2, height / 2)` with floor division, so even-sized kernels are
//! anchored toward the bottom-right.

use crate::{FilterError, FilterResult};
use rasterkit_core::WindowShape;

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Size and center of the kernel
    shape: WindowShape,
    /// Kernel weights (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Core(ShapeMismatch)` for empty or jagged rows
    /// and `FilterError::InvalidKernel` for non-finite weights.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> FilterResult<Self> {
        let m = rasterkit_core::Matrix::from_rows(rows)?;
        let (width, height) = m.dimensions();
        Self::from_slice(width, height, m.data())
    }

    /// Create a kernel from a slice of row-major weights.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        let shape = WindowShape::new(width, height)
            .map_err(|e| FilterError::InvalidKernel(e.to_string()))?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "data length {} doesn't match {width}x{height} = {expected}",
                data.len()
            )));
        }
        if let Some(idx) = data.iter().position(|v| !v.is_finite()) {
            return Err(FilterError::InvalidKernel(format!(
                "weight at ({}, {}) is not finite",
                idx % width as usize,
                idx / width as usize
            )));
        }
        Ok(Kernel {
            shape,
            data: data.to_vec(),
        })
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        if size == 0 {
            return Err(FilterError::InvalidParameters(
                "box kernel size must be > 0".into(),
            ));
        }
        let n = size as usize * size as usize;
        let value = 1.0 / n as f64;
        Ok(Kernel {
            shape: WindowShape::new(size, size)?,
            data: vec![value; n],
        })
    }

    /// Create a normalized Gaussian kernel of the given (odd) size.
    pub fn gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian kernel size must be odd, got {size}"
            )));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "sigma must be positive, got {sigma}"
            )));
        }

        let half = (size / 2) as i64;
        let denom = 2.0 * sigma * sigma;
        let mut data = Vec::with_capacity(size as usize * size as usize);
        for dy in -half..=half {
            for dx in -half..=half {
                let r2 = (dx * dx + dy * dy) as f64;
                data.push((-r2 / denom).exp());
            }
        }

        let mut kernel = Kernel {
            shape: WindowShape::new(size, size)?,
            data,
        };
        kernel.normalize();
        Ok(kernel)
    }

    /// Sobel kernel responding to vertical edges (horizontal gradient).
    ///
    /// Weights sum to zero, so convolution applies it unnormalized.
    pub fn sobel_vertical() -> Self {
        Kernel {
            shape: WindowShape::SQUARE_3X3,
            data: vec![1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0],
        }
    }

    /// Sobel kernel responding to horizontal edges (vertical gradient).
    pub fn sobel_horizontal() -> Self {
        Kernel {
            shape: WindowShape::SQUARE_3X3,
            data: vec![1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0],
        }
    }

    /// Create a 4-neighbor Laplacian kernel.
    pub fn laplacian() -> Self {
        Kernel {
            shape: WindowShape::SQUARE_3X3,
            data: vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0],
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.shape.width()
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.shape.height()
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.shape.center_x()
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.shape.center_y()
    }

    /// Sliding window matching this kernel's size and center.
    #[inline]
    pub fn window(&self) -> WindowShape {
        self.shape
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.width() && y < self.height() {
            Some(self.data[y as usize * self.width() as usize + x as usize])
        } else {
            None
        }
    }

    /// Iterate over `(kx, ky, weight)` in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        let w = self.width();
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &k)| (idx as u32 % w, idx as u32 / w, k))
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel whose weights sum to exactly 0 (an edge detector) is left
    /// unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum == 0.0 {
            log::trace!(
                "kernel {}x{} sums to zero, skipping normalization",
                self.width(),
                self.height()
            );
            return;
        }
        for v in &mut self.data {
            *v /= sum;
        }
    }

    /// Return a normalized copy of the kernel.
    pub fn normalized(&self) -> Self {
        let mut k = self.clone();
        k.normalize();
        k
    }
}
