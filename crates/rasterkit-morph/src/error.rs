//! Error types for rasterkit-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterkit_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Invalid sequence format
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// Skeletonization hit its iteration bound before reaching a fixed point
    #[error("skeletonization did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
