//! rasterkit-morph - Binary morphology
//!
//! This crate provides morphological operations including:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary morphology: erosion, dilation, opening, closing
//! - Hit-miss transform for pattern detection
//! - Morphological gradient, top-hat, and bottom-hat transforms
//! - Bounded iterative skeletonization
//! - Morphological sequence operations for chaining multiple operations

pub mod binary;
mod error;
pub mod sel;
pub mod sequence;
pub mod skeleton;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

// Re-export commonly used binary morphology functions
pub use binary::{
    bottom_hat, close, close_brick, dilate, dilate_brick, erode, erode_brick, gradient,
    hit_miss_transform, open, open_brick, top_hat,
};

// Re-export skeletonization
pub use skeleton::{Skeleton, SkeletonOptions, skeletonize, skeletonize_with};

// Re-export sequence functions
pub use sequence::{MorphOp, MorphSequence, morph_sequence};
