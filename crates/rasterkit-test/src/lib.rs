//! rasterkit-test - Regression test framework for rasterkit
//!
//! Supports three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use rasterkit_test::RegParams;
//!
//! let mut rp = RegParams::new("binmorph");
//! rp.compare_values(9.0, eroded.count_foreground() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use rasterkit_core::{BinaryMatrix, ScalarMatrix};

/// Load a scalar fixture matrix from the test data directory
///
/// # Arguments
///
/// * `name` - Fixture filename (e.g., "ramp.txt")
pub fn load_test_matrix(name: &str) -> TestResult<ScalarMatrix> {
    let path = test_data_path(name);
    ScalarMatrix::read_from_file(&path).map_err(|e| TestError::MatrixLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Load a binary fixture matrix from the test data directory
pub fn load_test_binary(name: &str) -> TestResult<BinaryMatrix> {
    let path = test_data_path(name);
    BinaryMatrix::read_from_file(&path).map_err(|e| TestError::MatrixLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // rasterkit-test is at crates/rasterkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/matrices/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
