//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to load a fixture matrix
    #[error("failed to load matrix '{path}': {message}")]
    MatrixLoad { path: String, message: String },

    /// Failed to write a matrix
    #[error("failed to write matrix '{path}': {message}")]
    MatrixWrite { path: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
