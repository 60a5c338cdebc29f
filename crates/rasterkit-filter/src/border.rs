//! Boundary handling for convolution

use crate::FilterError;
use std::fmt;
use std::str::FromStr;

/// How convolution samples positions outside the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// No padding. Any output cell whose window reaches outside the input
    /// keeps the original input value instead of a partial sum.
    #[default]
    None,
    /// Out-of-bounds samples read as 0.
    Zero,
    /// Out-of-bounds samples read the nearest in-bounds cell, clamping row
    /// and column independently.
    Replicate,
}

impl BoundaryPolicy {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::None => "none",
            BoundaryPolicy::Zero => "zero",
            BoundaryPolicy::Replicate => "replicate",
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryPolicy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(BoundaryPolicy::None),
            "zero" | "zero-pad" => Ok(BoundaryPolicy::Zero),
            "replicate" => Ok(BoundaryPolicy::Replicate),
            other => Err(FilterError::InvalidParameters(format!(
                "unknown boundary policy '{other}', expected none, zero or replicate"
            ))),
        }
    }
}
