//! Text serialization for matrices
//!
//! # Format
//!
//! ```text
//! Matrix Version 1
//! w = W, h = H
//! v v v ...
//! ```
//!
//! followed by `H` lines of `W` whitespace-separated values. Binary
//! matrices use the same format with 0/1 values and are re-validated on
//! read.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::matrix::binary::BinaryMatrix;
use std::fmt::Display;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Matrix text format version
const MATRIX_VERSION: i32 = 1;

/// Maximum input size in bytes.
const MAX_INPUT_SIZE: u64 = 100_000_000;

/// Maximum cell count accepted from a size line (2^28)
const MAX_MATRIX_CELLS: u64 = 1 << 28;

impl<T: Display> Matrix<T> {
    /// Write the matrix to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "Matrix Version {MATRIX_VERSION}")?;
        writeln!(writer, "w = {}, h = {}", self.width(), self.height())?;
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(writer, "{}", line.join(" "))?;
        }
        Ok(())
    }

    /// Write the matrix to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the matrix to bytes.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

impl<T: FromStr> Matrix<T> {
    /// Read a matrix from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(Error::DecodeError(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a matrix from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a matrix from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::DecodeError(format!("matrix text is not UTF-8: {e}")))?;
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let version_line = lines
            .next()
            .ok_or_else(|| Error::DecodeError("missing version line".into()))?;
        let version = version_line
            .trim()
            .strip_prefix("Matrix Version ")
            .and_then(|v| v.trim().parse::<i32>().ok())
            .ok_or_else(|| Error::DecodeError(format!("invalid version line: {version_line}")))?;
        if version != MATRIX_VERSION {
            return Err(Error::DecodeError(format!(
                "unsupported matrix version {version}, expected {MATRIX_VERSION}"
            )));
        }

        let size_line = lines
            .next()
            .ok_or_else(|| Error::DecodeError("missing size line".into()))?;
        let (width, height) = parse_size_line(size_line)?;
        let ncells = u64::from(width) * u64::from(height);
        if ncells > MAX_MATRIX_CELLS {
            return Err(Error::DecodeError(format!(
                "matrix too large: {ncells} cells exceeds maximum {MAX_MATRIX_CELLS}"
            )));
        }

        let mut values = Vec::with_capacity(ncells as usize);
        for (y, line) in lines.by_ref().take(height as usize).enumerate() {
            let before = values.len();
            for token in line.split_whitespace() {
                let v = token.parse::<T>().map_err(|_| {
                    Error::DecodeError(format!("invalid value '{token}' in row {y}"))
                })?;
                values.push(v);
            }
            let count = values.len() - before;
            if count != width as usize {
                return Err(Error::DecodeError(format!(
                    "row {y} has {count} values, expected {width}"
                )));
            }
        }
        if values.len() as u64 != ncells {
            return Err(Error::DecodeError(format!(
                "matrix data truncated: expected {height} rows of {width} values"
            )));
        }

        Matrix::from_data(width, height, values)
    }
}

impl BinaryMatrix {
    /// Read a binary matrix, validating that every value is 0 or 1.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_matrix(Matrix::<u8>::read_from_bytes(data)?)
    }

    /// Read a binary matrix from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_matrix(Matrix::<u8>::read_from_file(path)?)
    }

    /// Serialize the binary matrix to bytes.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        self.as_matrix().write_to_bytes()
    }
}

/// Parse "w = W, h = H"
fn parse_size_line(line: &str) -> Result<(u32, u32)> {
    let invalid = || Error::DecodeError(format!("invalid size line: {line}"));
    let mut width = None;
    let mut height = None;
    for part in line.split(',') {
        let (key, value) = part.split_once('=').ok_or_else(invalid)?;
        let value: u32 = value.trim().parse().map_err(|_| invalid())?;
        match key.trim() {
            "w" => width = Some(value),
            "h" => height = Some(value),
            _ => return Err(invalid()),
        }
    }
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScalarMatrix;

    #[test]
    fn test_scalar_serialization() {
        let m = ScalarMatrix::from_rows(vec![vec![1.5, -2.0], vec![0.0, 255.0]]).unwrap();
        let bytes = m.write_to_bytes().unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("Matrix Version 1\nw = 2, h = 2\n"));
        let m2 = ScalarMatrix::read_from_bytes(&bytes).unwrap();
        assert_eq!(m, m2);
    }

    #[test]
    fn test_binary_read_validates() {
        let text = b"Matrix Version 1\nw = 2, h = 1\n0 3\n";
        let err = BinaryMatrix::read_from_bytes(text).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { x: 1, y: 0, value: 3 }));
    }

    #[test]
    fn test_read_errors() {
        assert!(ScalarMatrix::read_from_bytes(b"").is_err());
        assert!(ScalarMatrix::read_from_bytes(b"Matrix Version 9\nw = 1, h = 1\n0\n").is_err());
        assert!(ScalarMatrix::read_from_bytes(b"Matrix Version 1\nw = 2, h = 2\n1 2\n").is_err());
        assert!(ScalarMatrix::read_from_bytes(b"Matrix Version 1\nw = 2, h = 1\n1 x\n").is_err());
        assert!(ScalarMatrix::read_from_bytes(b"Matrix Version 1\nw = 0, h = 1\n").is_err());
    }

    #[test]
    fn test_oversized_header_rejected() {
        let text = b"Matrix Version 1\nw = 4294967295, h = 4294967295\n0\n";
        let err = Matrix::<u8>::read_from_bytes(text).unwrap_err();
        assert!(matches!(&err, Error::DecodeError(msg) if msg.contains("too large")));
    }
}
