//! Convolution operations
//!
//! Implements boundary-aware convolution of a scalar matrix with an
//! arbitrary kernel.

use crate::{BoundaryPolicy, FilterError, FilterResult, Kernel};
use rasterkit_core::{ScalarMatrix, map_windows, side_for_radius};

/// Convolve a scalar matrix with a kernel
///
/// The kernel is normalized first (unless its weights sum to 0). Each output
/// cell is `Σ k[ky][kx] * input[y + ky - cy][x + kx - cx]`, with positions
/// outside the input resolved by `policy`:
///
/// - [`BoundaryPolicy::Zero`]: read as 0
/// - [`BoundaryPolicy::Replicate`]: read the nearest edge cell
/// - [`BoundaryPolicy::None`]: the cell keeps its original input value
///
/// The result always has the same shape as `input`.
pub fn convolve(input: &ScalarMatrix, kernel: &Kernel, policy: BoundaryPolicy) -> ScalarMatrix {
    let kernel = kernel.normalized();
    let shape = kernel.window();
    let weights: Vec<(u32, u32, f64)> = kernel.entries().collect();

    log::trace!(
        "convolve {}x{} with {}x{} kernel, policy {}",
        input.width(),
        input.height(),
        kernel.width(),
        kernel.height(),
        policy
    );

    match policy {
        // Every tap is checked, including zero weights
        BoundaryPolicy::None => map_windows(input, shape, |nb| {
            let mut sum = 0.0;
            for &(kx, ky, k) in &weights {
                match nb.get(kx, ky) {
                    Some(v) => sum += v * k,
                    None => return nb.center(),
                }
            }
            sum
        }),
        BoundaryPolicy::Zero => map_windows(input, shape, |nb| {
            weights
                .iter()
                .map(|&(kx, ky, k)| nb.get(kx, ky).unwrap_or(0.0) * k)
                .sum::<f64>()
        }),
        BoundaryPolicy::Replicate => map_windows(input, shape, |nb| {
            weights
                .iter()
                .map(|&(kx, ky, k)| nb.get_clamped(kx, ky) * k)
                .sum::<f64>()
        }),
    }
}

/// Apply box (average) blur
pub fn box_blur(
    input: &ScalarMatrix,
    radius: u32,
    policy: BoundaryPolicy,
) -> FilterResult<ScalarMatrix> {
    let kernel = Kernel::box_kernel(blur_size(radius)?)?;
    Ok(convolve(input, &kernel, policy))
}

/// Apply Gaussian blur
pub fn gaussian_blur(
    input: &ScalarMatrix,
    radius: u32,
    sigma: f64,
    policy: BoundaryPolicy,
) -> FilterResult<ScalarMatrix> {
    let kernel = Kernel::gaussian(blur_size(radius)?, sigma)?;
    Ok(convolve(input, &kernel, policy))
}

fn blur_size(radius: u32) -> FilterResult<u32> {
    side_for_radius(radius).map_err(|e| FilterError::InvalidParameters(e.to_string()))
}
