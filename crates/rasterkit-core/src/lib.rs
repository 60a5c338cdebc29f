//! rasterkit-core - Basic data structures for the filtering engine
//!
//! This crate provides the types shared by the convolution and morphology
//! crates:
//!
//! - [`Matrix`] / [`ScalarMatrix`] - Rectangular row-major grids
//! - [`BinaryMatrix`] - Grid constrained to {0, 1}
//! - [`window`] - The sliding-window traversal every operation is built on
//! - [`convert`] - Conversion to and from 8-bit grayscale rasters
//!
//! A constructed matrix is never empty and never jagged; every operation
//! returns a new matrix with the same shape as its input.

pub mod convert;
pub mod error;
pub mod matrix;
pub mod window;

pub use error::{Error, Result};
pub use matrix::binary::BinaryMatrix;
pub use matrix::{Matrix, ScalarMatrix};
pub use window::{Neighborhood, WindowShape, map_windows, map_windows_binary, side_for_radius};
