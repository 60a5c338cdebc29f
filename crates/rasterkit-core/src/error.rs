//! Error types for rasterkit-core
//!
//! Provides a unified error type for matrix construction, validation and
//! serialization. Each variant carries enough context for diagnostics
//! without exposing internal layout details.

use thiserror::Error;

/// Rasterkit core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix, kernel or structuring element is empty or jagged
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A binary matrix or structuring element holds a value outside {0, 1}
    #[error("invalid value {value} at ({x}, {y}): expected 0 or 1")]
    InvalidValue { x: u32, y: u32, value: i64 },

    /// Invalid matrix dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) in {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed serialized matrix
    #[error("decode error: {0}")]
    DecodeError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rasterkit-core operations
pub type Result<T> = std::result::Result<T, Error>;
