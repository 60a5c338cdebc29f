//! Matrix ⇄ raster conversion
//!
//! Thin adapters between the matrix types and 8-bit grayscale rasters from
//! the `image` crate. Decoding and encoding files is left to the caller.

use crate::error::Result;
use crate::matrix::binary::BinaryMatrix;
use crate::matrix::{Matrix, ScalarMatrix};
use image::{GrayImage, Luma};

impl ScalarMatrix {
    /// Build a scalar matrix from the brightness values of a grayscale image
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for an empty image.
    pub fn from_gray_image(img: &GrayImage) -> Result<Self> {
        let data = img.as_raw().iter().map(|&v| f64::from(v)).collect();
        Matrix::from_data(img.width(), img.height(), data)
    }

    /// Render the matrix as a grayscale image
    ///
    /// Values are clamped to [0, 255] and rounded to the nearest integer.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            let v = self.get_unchecked(x, y);
            Luma([clamp_to_u8(v)])
        })
    }
}

impl BinaryMatrix {
    /// Threshold a grayscale image: 1 where brightness > `threshold`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for an empty image.
    pub fn from_gray_image(img: &GrayImage, threshold: u8) -> Result<Self> {
        Self::from_fn(img.width(), img.height(), |x, y| {
            img.get_pixel(x, y).0[0] > threshold
        })
    }

    /// Threshold a scalar matrix: 1 where value > `threshold`
    pub fn threshold(src: &ScalarMatrix, threshold: f64) -> Self {
        Self::from_matrix_unchecked(src.map(|&v| u8::from(v > threshold)))
    }

    /// Render the matrix as a grayscale image (0 → 0, 1 → 255)
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([if self.is_set(x, y) { 255 } else { 0 }])
        })
    }
}

fn clamp_to_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_to_gray_clamps_and_rounds() {
        let m = ScalarMatrix::from_rows(vec![vec![-12.0, 0.4, 0.6, 127.5, 300.0]]).unwrap();
        let img = m.to_gray_image();
        let values: Vec<u8> = img.as_raw().clone();
        assert_eq!(values, vec![0, 0, 1, 128, 255]);
    }

    #[test]
    fn test_gray_roundtrip() {
        let img = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 40 + y * 10) as u8]));
        let m = ScalarMatrix::from_gray_image(&img).unwrap();
        assert_eq!(m.dimensions(), (4, 3));
        assert_eq!(m.get(3, 2), Some(140.0));
        assert_eq!(m.to_gray_image(), img);
    }

    #[test]
    fn test_binary_threshold() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([[100u8, 127, 128][x as usize]]));
        let bin = BinaryMatrix::from_gray_image(&img, 127).unwrap();
        assert_eq!(bin.to_rows(), vec![vec![0, 0, 1]]);

        let out = bin.to_gray_image();
        assert_eq!(out.as_raw(), &vec![0, 0, 255]);

        let m = ScalarMatrix::from_rows(vec![vec![0.0, 127.0, 127.5]]).unwrap();
        assert_eq!(BinaryMatrix::threshold(&m, 127.0).to_rows(), vec![vec![0, 0, 1]]);
    }
}
