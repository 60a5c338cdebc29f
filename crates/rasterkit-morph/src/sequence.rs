//! Morphological sequence operations
//!
//! Executes a chain of binary morphological operations described by a
//! string.
//!
//! # Sequence String Format
//!
//! Operations are separated by `+` and whitespace is ignored.
//! Each operation begins with a case-insensitive character followed by
//! the size of a brick structuring element:
//!
//! - `d<w>.<h>` - Dilation
//! - `e<w>.<h>` - Erosion
//! - `o<w>.<h>` - Opening
//! - `c<w>.<h>` - Closing
//! - `s<w>.<h>` - Skeletonization (default pass limit)
//!
//! # Examples
//!
//! ```
//! use rasterkit_core::BinaryMatrix;
//! use rasterkit_morph::sequence::{MorphSequence, morph_sequence};
//!
//! let seq = MorphSequence::parse("o3.3 + d5.1").unwrap();
//! assert_eq!(seq.len(), 2);
//!
//! let bin = BinaryMatrix::new_filled(8, 8).unwrap();
//! let out = morph_sequence(&bin, "e3.3 + d3.3").unwrap();
//! assert_eq!(out.dimensions(), (8, 8));
//! ```

use crate::binary::{close, dilate, erode, open};
use crate::skeleton::skeletonize;
use crate::{MorphError, MorphResult, Sel};
use rasterkit_core::BinaryMatrix;
use std::fmt;

/// A parsed morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Dilation with a brick structuring element
    Dilate { width: u32, height: u32 },
    /// Erosion with a brick structuring element
    Erode { width: u32, height: u32 },
    /// Opening (erosion followed by dilation)
    Open { width: u32, height: u32 },
    /// Closing (dilation followed by erosion)
    Close { width: u32, height: u32 },
    /// Skeletonization with a brick structuring element
    Skeletonize { width: u32, height: u32 },
}

impl MorphOp {
    /// Get the width and height of the operation's structuring element
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            MorphOp::Dilate { width, height }
            | MorphOp::Erode { width, height }
            | MorphOp::Open { width, height }
            | MorphOp::Close { width, height }
            | MorphOp::Skeletonize { width, height } => (width, height),
        }
    }

    fn letter(&self) -> char {
        match self {
            MorphOp::Dilate { .. } => 'd',
            MorphOp::Erode { .. } => 'e',
            MorphOp::Open { .. } => 'o',
            MorphOp::Close { .. } => 'c',
            MorphOp::Skeletonize { .. } => 's',
        }
    }

    /// Apply this operation to a binary matrix
    pub fn apply(&self, bin: &BinaryMatrix) -> MorphResult<BinaryMatrix> {
        let (width, height) = self.dimensions();
        let sel = Sel::create_brick(width, height)?;
        Ok(match self {
            MorphOp::Dilate { .. } => dilate(bin, &sel),
            MorphOp::Erode { .. } => erode(bin, &sel),
            MorphOp::Open { .. } => open(bin, &sel),
            MorphOp::Close { .. } => close(bin, &sel),
            MorphOp::Skeletonize { .. } => skeletonize(bin, &sel)?,
        })
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "{}{width}.{height}", self.letter())
    }
}

/// A parsed morphological sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphSequence {
    ops: Vec<MorphOp>,
}

impl MorphSequence {
    /// Parse a sequence string into a MorphSequence
    ///
    /// # Errors
    ///
    /// Returns `InvalidSequence` for an empty sequence, an empty operation
    /// between `+` signs, an unknown operation letter, or malformed or
    /// zero dimensions.
    ///
    /// ```
    /// use rasterkit_morph::sequence::MorphSequence;
    ///
    /// let seq = MorphSequence::parse("d3.3 + e5.5").unwrap();
    /// assert_eq!(seq.ops().len(), 2);
    /// assert!(MorphSequence::parse("d3.3 + q1.1").is_err());
    /// ```
    pub fn parse(sequence: &str) -> MorphResult<Self> {
        if sequence.trim().is_empty() {
            return Err(MorphError::InvalidSequence("empty sequence".to_string()));
        }

        let ops = sequence
            .split('+')
            .enumerate()
            .map(|(i, part)| {
                // Remove whitespace
                let op_str: String = part.chars().filter(|c| !c.is_whitespace()).collect();
                if op_str.is_empty() {
                    return Err(MorphError::InvalidSequence(format!(
                        "empty operation at position {}",
                        i + 1
                    )));
                }
                Self::parse_operation(&op_str)
            })
            .collect::<MorphResult<Vec<_>>>()?;

        Ok(MorphSequence { ops })
    }

    /// Parse a single operation string
    fn parse_operation(op_str: &str) -> MorphResult<MorphOp> {
        let mut chars = op_str.chars();
        let Some(first) = chars.next() else {
            return Err(MorphError::InvalidSequence("empty operation".to_string()));
        };
        let dims = chars.as_str();

        let make: fn(u32, u32) -> MorphOp = match first.to_ascii_lowercase() {
            'd' => |width, height| MorphOp::Dilate { width, height },
            'e' => |width, height| MorphOp::Erode { width, height },
            'o' => |width, height| MorphOp::Open { width, height },
            'c' => |width, height| MorphOp::Close { width, height },
            's' => |width, height| MorphOp::Skeletonize { width, height },
            other => {
                return Err(MorphError::InvalidSequence(format!(
                    "unknown operation '{other}' in '{op_str}'"
                )));
            }
        };

        let (width, height) = Self::parse_dimensions(dims)?;
        Ok(make(width, height))
    }

    /// Parse dimensions from a string like "3.5" -> (3, 5)
    fn parse_dimensions(dim_str: &str) -> MorphResult<(u32, u32)> {
        let Some((w, h)) = dim_str.split_once('.') else {
            return Err(MorphError::InvalidSequence(format!(
                "invalid dimensions format '{dim_str}', expected 'width.height'"
            )));
        };

        let width: u32 = w.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid width '{w}' in '{dim_str}'"))
        })?;

        let height: u32 = h.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid height '{h}' in '{dim_str}'"))
        })?;

        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSequence(format!(
                "dimensions must be > 0, got {width}x{height}"
            )));
        }

        Ok((width, height))
    }

    /// Get the operations in this sequence
    pub fn ops(&self) -> &[MorphOp] {
        &self.ops
    }

    /// Get the number of operations in the sequence
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every operation in order, stopping at the first failure
    pub fn apply(&self, bin: &BinaryMatrix) -> MorphResult<BinaryMatrix> {
        let mut result = bin.clone();
        for (i, op) in self.ops.iter().enumerate() {
            result = op.apply(&result)?;
            log::debug!(
                "sequence step {}/{} {op}: {} foreground",
                i + 1,
                self.ops.len(),
                result.count_foreground()
            );
        }
        Ok(result)
    }
}

impl fmt::Display for MorphSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Execute a binary morphological sequence
///
/// # Arguments
///
/// * `bin` - A binary matrix
/// * `sequence` - A sequence string (e.g., "o5.5 + e3.3")
///
/// # Returns
///
/// A new matrix with all operations applied, or the first error.
pub fn morph_sequence(bin: &BinaryMatrix, sequence: &str) -> MorphResult<BinaryMatrix> {
    MorphSequence::parse(sequence)?.apply(bin)
}
