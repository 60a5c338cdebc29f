//! rasterkit-filter - Spatial filtering
//!
//! This crate provides:
//!
//! - [`Kernel`] - Convolution kernels with floor-centered anchors
//! - [`BoundaryPolicy`] - Out-of-bounds handling (none, zero, replicate)
//! - [`convolve`] - Boundary-aware convolution of a scalar matrix
//! - Blur helpers built on top of it (box, Gaussian)

pub mod border;
pub mod convolve;
mod error;
pub mod kernel;

pub use border::BoundaryPolicy;
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

pub use convolve::{box_blur, convolve, gaussian_blur};
