//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use rasterkit_core::{BinaryMatrix, Matrix, ScalarMatrix};
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized means compare
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "binmorph")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
    /// Directory holding golden files
    golden_dir: String,
    /// Directory receiving regression output
    regout_dir: String,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        Self::with_mode(test_name, RegTestMode::from_env())
    }

    /// Create regression test parameters with an explicit mode
    pub fn with_mode(test_name: &str, mode: RegTestMode) -> Self {
        Self::with_dirs(test_name, mode, golden_dir(), regout_dir())
    }

    /// Create regression test parameters writing to explicit directories
    pub fn with_dirs(
        test_name: &str,
        mode: RegTestMode,
        golden_dir: impl Into<String>,
        regout_dir: impl Into<String>,
    ) -> Self {
        let golden_dir = golden_dir.into();
        let regout_dir = regout_dir.into();
        // Ensure directories exist
        let _ = fs::create_dir_all(&golden_dir);
        let _ = fs::create_dir_all(&regout_dir);

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
            golden_dir,
            regout_dir,
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two matrices for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the matrices have the same shape and values.
    pub fn compare_matrices<T: Copy + PartialEq>(
        &mut self,
        m1: &Matrix<T>,
        m2: &Matrix<T>,
    ) -> bool {
        self.index += 1;

        if !m1.same_shape(m2) {
            self.fail(format!(
                "Failure in {}_reg: matrix comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                m1.width(),
                m1.height(),
                m2.width(),
                m2.height()
            ));
            return false;
        }

        if let Some((x, y)) = first_difference(m1, m2) {
            self.fail(format!(
                "Failure in {}_reg: matrix comparison for index {} - value mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }

        true
    }

    /// Compare two binary matrices for exact equality
    pub fn compare_binary(&mut self, b1: &BinaryMatrix, b2: &BinaryMatrix) -> bool {
        self.compare_matrices(b1.as_matrix(), b2.as_matrix())
    }

    /// Compare two scalar matrices cell by cell within `delta`
    pub fn compare_scalar(&mut self, m1: &ScalarMatrix, m2: &ScalarMatrix, delta: f64) -> bool {
        self.index += 1;

        if !m1.same_shape(m2) {
            self.fail(format!(
                "Failure in {}_reg: scalar comparison for index {} - dimension mismatch",
                self.test_name, self.index
            ));
            return false;
        }

        let worst = m1
            .data()
            .iter()
            .zip(m2.data())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        if worst > delta {
            self.fail(format!(
                "Failure in {}_reg: scalar comparison for index {}\n\
                 max difference = {} but allowed delta = {}",
                self.test_name, self.index, worst, delta
            ));
            return false;
        }

        true
    }

    /// Write a matrix in text form and check against golden file
    pub fn write_matrix_and_check<T: Display>(&mut self, m: &Matrix<T>) -> TestResult<()> {
        self.index += 1;

        let local_path = self.local_path("txt");
        m.write_to_file(&local_path).map_err(|e| TestError::MatrixWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path)
    }

    /// Write a binary matrix in text form and check against golden file
    pub fn write_binary_and_check(&mut self, b: &BinaryMatrix) -> TestResult<()> {
        self.write_matrix_and_check(b.as_matrix())
    }

    /// Write data to file and check against golden file
    ///
    /// # Arguments
    ///
    /// * `data` - Data to write
    /// * `ext` - File extension
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = self.local_path(ext);
        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    fn local_path(&self, ext: &str) -> String {
        format!(
            "{}/{}.{:02}.{}",
            self.regout_dir,
            self.test_name,
            self.index,
            ext
        )
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with golden file.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            self.golden_dir,
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    ));
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                // Byte differences (line endings, spacing) are tolerated if
                // both files decode to the same matrix
                if local_data != golden_data && !same_matrix_text(&local_data, &golden_data) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn first_difference<T: Copy + PartialEq>(m1: &Matrix<T>, m2: &Matrix<T>) -> Option<(u32, u32)> {
    let w = m1.width() as usize;
    m1.data()
        .iter()
        .zip(m2.data())
        .position(|(a, b)| a != b)
        .map(|idx| ((idx % w) as u32, (idx / w) as u32))
}

fn same_matrix_text(a: &[u8], b: &[u8]) -> bool {
    match (
        ScalarMatrix::read_from_bytes(a),
        ScalarMatrix::read_from_bytes(b),
    ) {
        (Ok(m1), Ok(m2)) => m1 == m2,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Generate);
        assert_eq!(RegTestMode::parse(" Display "), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("bogus"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(1.0, f64::NAN, 10.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_matrices() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        let a = BinaryMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        let b = a.invert();
        assert!(rp.compare_binary(&a, &a.clone()));
        assert!(!rp.compare_binary(&a, &b));
        let c = BinaryMatrix::new(3, 2).unwrap();
        assert!(!rp.compare_binary(&a, &c));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_scalar() {
        let mut rp = RegParams::with_mode("test", RegTestMode::Compare);
        let a = ScalarMatrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let b = ScalarMatrix::from_rows(vec![vec![1.0, 2.0 + 1e-12]]).unwrap();
        assert!(rp.compare_scalar(&a, &b, 1e-9));
        assert!(!rp.compare_scalar(&a, &b, 0.0));
    }

    #[test]
    fn test_generate_then_compare() {
        let tmp = tempfile::tempdir().unwrap();
        let golden = tmp.path().join("golden").to_string_lossy().into_owned();
        let regout = tmp.path().join("regout").to_string_lossy().into_owned();
        let m = BinaryMatrix::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap();

        let mut rp = RegParams::with_dirs("selftest", RegTestMode::Generate, &golden, &regout);
        rp.write_binary_and_check(&m).unwrap();
        assert!(rp.cleanup());
        assert!(Path::new(&format!("{golden}/selftest_golden.01.txt")).exists());

        let mut rp = RegParams::with_dirs("selftest", RegTestMode::Compare, &golden, &regout);
        rp.write_binary_and_check(&m).unwrap();
        assert!(rp.is_success());

        let mut rp = RegParams::with_dirs("selftest", RegTestMode::Compare, &golden, &regout);
        rp.write_binary_and_check(&m.invert()).unwrap();
        assert!(!rp.is_success());

        // Nothing lands in the shared golden directory
        assert!(!Path::new(&format!("{}/selftest_golden.01.txt", golden_dir())).exists());
    }

    #[test]
    fn test_same_matrix_text() {
        let a = b"Matrix Version 1\nw = 2, h = 1\n1 2\n";
        let b = b"Matrix Version 1\r\nw = 2, h = 1\r\n1   2\r\n";
        assert!(same_matrix_text(a, b));
        assert!(!same_matrix_text(a, b"Matrix Version 1\nw = 2, h = 1\n1 3\n"));
    }
}
