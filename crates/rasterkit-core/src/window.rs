//! Sliding-window traversal
//!
//! Convolution, erosion, dilation and the hit-miss transform all share the
//! same outer structure: for every output cell, visit each offset of a
//! small window centered on that cell and fold the samples into one value.
//! This module owns that traversal; each operation only supplies the
//! per-cell closure.
//!
//! The window anchor is `(width / 2, height / 2)` with floor division, so
//! even-sized windows are anchored toward the bottom-right.
//!
//! With the `rayon` feature enabled, output rows are computed in parallel.
//! Every output cell reads only the immutable source, so rows are
//! independent.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::matrix::binary::BinaryMatrix;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Side length `2 * radius + 1` of a square window
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if the side does not fit in `u32`.
pub fn side_for_radius(radius: u32) -> Result<u32> {
    radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| Error::InvalidParameter(format!("radius {radius} is too large")))
}

/// Size and anchor of a sliding window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowShape {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
}

impl WindowShape {
    /// Create a window of the given size anchored at its floor center
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ShapeMismatch(format!(
                "window must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(WindowShape {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
        })
    }

    /// Square window of side `2 * radius + 1`, anchored at its middle cell
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the side does not fit in `u32`.
    pub fn square(radius: u32) -> Result<Self> {
        let size = side_for_radius(radius)?;
        Ok(WindowShape {
            width: size,
            height: size,
            cx: radius,
            cy: radius,
        })
    }

    /// The 3x3 window anchored at its middle cell
    pub const SQUARE_3X3: WindowShape = WindowShape {
        width: 3,
        height: 3,
        cx: 1,
        cy: 1,
    };

    /// Get the window width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the window height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the anchor column
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the anchor row
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Iterate over all window positions `(kx, ky)` in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |ky| (0..w).map(move |kx| (kx, ky)))
    }
}

/// The window around one output cell
///
/// Window positions `(kx, ky)` are translated to source coordinates
/// `(x + kx - cx, y + ky - cy)`.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a, T> {
    src: &'a Matrix<T>,
    shape: WindowShape,
    x: u32,
    y: u32,
}

impl<T: Copy> Neighborhood<'_, T> {
    /// Column of the output cell
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Row of the output cell
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Source value at the output cell itself
    #[inline]
    pub fn center(&self) -> T {
        self.src.get_unchecked(self.x, self.y)
    }

    #[inline]
    fn source_coords(&self, kx: u32, ky: u32) -> (i64, i64) {
        (
            i64::from(self.x) + i64::from(kx) - i64::from(self.shape.cx),
            i64::from(self.y) + i64::from(ky) - i64::from(self.shape.cy),
        )
    }

    /// Source value under window position `(kx, ky)`, or `None` when that
    /// position falls outside the source
    #[inline]
    pub fn get(&self, kx: u32, ky: u32) -> Option<T> {
        let (sx, sy) = self.source_coords(kx, ky);
        if sx < 0 || sy < 0 {
            return None;
        }
        self.src.get(u32::try_from(sx).ok()?, u32::try_from(sy).ok()?)
    }

    /// Source value under window position `(kx, ky)`, with each coordinate
    /// clamped independently to the nearest valid row and column
    #[inline]
    pub fn get_clamped(&self, kx: u32, ky: u32) -> T {
        let (sx, sy) = self.source_coords(kx, ky);
        let sx = sx.clamp(0, i64::from(self.src.width()) - 1) as u32;
        let sy = sy.clamp(0, i64::from(self.src.height()) - 1) as u32;
        self.src.get_unchecked(sx, sy)
    }
}

/// Evaluate `f` on the neighborhood of every cell of `src`
///
/// The result has the same shape as `src` and never shares storage with it.
pub fn map_windows<T, U, F>(src: &Matrix<T>, shape: WindowShape, f: F) -> Matrix<U>
where
    T: Copy + Sync,
    U: Copy + Default + Send,
    F: Fn(&Neighborhood<'_, T>) -> U + Sync,
{
    let (w, h) = src.dimensions();
    let mut data = vec![U::default(); w as usize * h as usize];

    let fill_row = |(y, row): (usize, &mut [U])| {
        for (x, out) in row.iter_mut().enumerate() {
            let nb = Neighborhood {
                src,
                shape,
                x: x as u32,
                y: y as u32,
            };
            *out = f(&nb);
        }
    };

    #[cfg(feature = "rayon")]
    data.par_chunks_mut(w as usize).enumerate().for_each(fill_row);

    #[cfg(not(feature = "rayon"))]
    data.chunks_mut(w as usize).enumerate().for_each(fill_row);

    Matrix::from_parts(w, h, data)
}

/// Evaluate the predicate `f` on the neighborhood of every cell of `src`,
/// producing a binary matrix (1 where `f` holds)
pub fn map_windows_binary<T, F>(src: &Matrix<T>, shape: WindowShape, f: F) -> BinaryMatrix
where
    T: Copy + Sync,
    F: Fn(&Neighborhood<'_, T>) -> bool + Sync,
{
    BinaryMatrix::from_matrix_unchecked(map_windows(src, shape, |nb| u8::from(f(nb))))
}
