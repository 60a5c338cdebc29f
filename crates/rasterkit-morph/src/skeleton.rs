//! Iterative skeletonization
//!
//! Each pass erodes the current matrix, finds the cells of the eroded
//! matrix that exactly match the SEL (foreground under every hit,
//! background under every other position) and removes them:
//!
//! ```text
//! eroded  = erode(current, sel)
//! removed = hit_miss(eroded, sel, complement(sel))
//! next    = eroded AND NOT removed
//! ```
//!
//! The loop stops at the first pass where `next == current`. Passes are
//! bounded by [`SkeletonOptions::max_iterations`] so a pathological SEL
//! cannot loop forever.

use crate::binary::{erode, hit_miss_transform};
use crate::{MorphError, MorphResult, Sel};
use rasterkit_core::BinaryMatrix;

/// Options for [`skeletonize_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkeletonOptions {
    /// Maximum number of passes. `None` uses `2 * max(width, height) + 2`
    /// for the input being skeletonized.
    pub max_iterations: Option<usize>,
}

impl SkeletonOptions {
    /// Options with an explicit pass limit
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        SkeletonOptions {
            max_iterations: Some(max_iterations),
        }
    }

    /// Pass limit applied to `bin`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for an explicit limit of 0.
    pub fn iteration_bound(&self, bin: &BinaryMatrix) -> MorphResult<usize> {
        match self.max_iterations {
            Some(0) => Err(MorphError::InvalidParameters(
                "max_iterations must be > 0".into(),
            )),
            Some(n) => Ok(n),
            None => Ok(2 * bin.width().max(bin.height()) as usize + 2),
        }
    }
}

/// Outcome of a bounded skeletonization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skeleton {
    /// A fixed point was reached after `iterations` passes
    Converged {
        matrix: BinaryMatrix,
        iterations: usize,
    },
    /// The pass limit ran out; `last` is the state after the final pass
    NotConverged {
        last: BinaryMatrix,
        iterations: usize,
    },
}

impl Skeleton {
    /// Whether a fixed point was reached
    pub fn is_converged(&self) -> bool {
        matches!(self, Skeleton::Converged { .. })
    }

    /// Number of passes performed
    pub fn iterations(&self) -> usize {
        match self {
            Skeleton::Converged { iterations, .. } | Skeleton::NotConverged { iterations, .. } => {
                *iterations
            }
        }
    }

    /// The resulting matrix, converged or not
    pub fn matrix(&self) -> &BinaryMatrix {
        match self {
            Skeleton::Converged { matrix, .. } => matrix,
            Skeleton::NotConverged { last, .. } => last,
        }
    }

    /// The converged matrix, or `NotConverged` as an error
    pub fn into_result(self) -> MorphResult<BinaryMatrix> {
        match self {
            Skeleton::Converged { matrix, .. } => Ok(matrix),
            Skeleton::NotConverged { iterations, .. } => {
                Err(MorphError::NotConverged { iterations })
            }
        }
    }
}

/// Skeletonize with the default pass limit
///
/// # Errors
///
/// Returns `NotConverged` if no fixed point is reached within
/// `2 * max(width, height) + 2` passes.
pub fn skeletonize(bin: &BinaryMatrix, sel: &Sel) -> MorphResult<BinaryMatrix> {
    skeletonize_with(bin, sel, &SkeletonOptions::default())?.into_result()
}

/// Skeletonize, reporting non-convergence as a [`Skeleton`] value
pub fn skeletonize_with(
    bin: &BinaryMatrix,
    sel: &Sel,
    options: &SkeletonOptions,
) -> MorphResult<Skeleton> {
    let bound = options.iteration_bound(bin)?;
    let miss = sel.complement();
    let mut current = bin.clone();

    for iteration in 1..=bound {
        let eroded = erode(&current, sel);
        let removed = hit_miss_transform(&eroded, sel, &miss)?;
        let next = eroded.and_not(&removed)?;

        log::debug!(
            "skeletonize pass {iteration}: {} -> {} foreground",
            current.count_foreground(),
            next.count_foreground()
        );

        if next == current {
            return Ok(Skeleton::Converged {
                matrix: current,
                iterations: iteration,
            });
        }
        current = next;
    }

    log::warn!("skeletonize stopped after {bound} passes without converging");
    Ok(Skeleton::NotConverged {
        last: current,
        iterations: bound,
    })
}
