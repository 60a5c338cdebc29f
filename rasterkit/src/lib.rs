//! rasterkit - Spatial and morphological filtering
//!
//! Provides the filtering engine of a batch image-transformation toolkit:
//!
//! - Boundary-aware convolution of scalar matrices
//! - Binary morphology (erosion, dilation, opening, closing, hit-miss)
//! - Bounded iterative skeletonization
//! - Conversion between matrices and 8-bit grayscale rasters
//!
//! Every operation borrows its input and returns a new matrix of the same
//! shape.
//!
//! # Example
//!
//! ```
//! use rasterkit::{BinaryMatrix, ScalarMatrix};
//! use rasterkit::filter::{BoundaryPolicy, Kernel, convolve};
//! use rasterkit::morph::{Sel, erode};
//!
//! let m = ScalarMatrix::new_with_value(5, 5, 2.0).unwrap();
//! let out = convolve(&m, &Kernel::box_kernel(3).unwrap(), BoundaryPolicy::Zero);
//! assert!((out.get(2, 2).unwrap() - 2.0).abs() < 1e-12);
//!
//! let bin = BinaryMatrix::new_filled(5, 5).unwrap();
//! let eroded = erode(&bin, &Sel::create_brick(3, 3).unwrap());
//! assert_eq!(eroded.count_foreground(), 9);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterkit_core::*;

// Re-export engine crates as modules to avoid name conflicts
pub use rasterkit_filter as filter;
pub use rasterkit_morph as morph;
