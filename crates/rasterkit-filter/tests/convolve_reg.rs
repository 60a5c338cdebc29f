//! Convolution regression test
//!
//! Tests kernel normalization, zero-sum kernels applied unnormalized,
//! the three boundary policies, and shape preservation.
//!
//! Run with:
//! ```
//! cargo test -p rasterkit-filter --test convolve_reg
//! ```

use rasterkit_core::ScalarMatrix;
use rasterkit_filter::{BoundaryPolicy, Kernel, box_blur, convolve, gaussian_blur};
use rasterkit_test::{RegParams, load_test_matrix};

const POLICIES: [BoundaryPolicy; 3] = [
    BoundaryPolicy::None,
    BoundaryPolicy::Zero,
    BoundaryPolicy::Replicate,
];

/// Cells whose window lies entirely inside the matrix
fn interior(m: &ScalarMatrix, k: &Kernel) -> impl Iterator<Item = (u32, u32)> {
    let (w, h) = m.dimensions();
    let (cx, cy) = (k.center_x(), k.center_y());
    let (kw, kh) = (k.width(), k.height());
    (cy..h + cy + 1 - kh).flat_map(move |y| (cx..w + cx + 1 - kw).map(move |x| (x, y)))
}

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    // ====================================================================
    // Test 1: normalized kernels reproduce a constant at interior cells
    // ====================================================================
    let value = 7.25;
    let constant = ScalarMatrix::new_with_value(9, 7, value).expect("constant");
    let kernels = [
        Kernel::box_kernel(3).expect("box"),
        Kernel::gaussian(5, 1.2).expect("gaussian"),
        Kernel::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).expect("2x3"),
        Kernel::from_rows(vec![vec![-1.0, -2.0, -4.0]]).expect("negative sum"),
    ];
    for kernel in &kernels {
        let out = convolve(&constant, kernel, BoundaryPolicy::Zero);
        let worst = interior(&constant, kernel)
            .map(|(x, y)| (out.get(x, y).unwrap_or(f64::NAN) - value).abs())
            .fold(0.0_f64, f64::max);
        rp.compare_values(0.0, worst, 1e-9);
    }

    // ====================================================================
    // Test 2: zero-sum kernel is applied unnormalized
    // ====================================================================
    let ramp = load_test_matrix("ramp.txt").expect("load ramp.txt");
    let (w, h) = ramp.dimensions();
    let sobel = Kernel::sobel_vertical();
    rp.compare_values(0.0, sobel.sum(), 0.0);
    let out = convolve(&ramp, &sobel, BoundaryPolicy::None);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            // Direct weighted sum with the raw kernel
            let mut expected = 0.0;
            for (kx, ky, k) in sobel.entries() {
                let sx = x + kx - 1;
                let sy = y + ky - 1;
                expected += k * ramp.get(sx, sy).unwrap_or(f64::NAN);
            }
            rp.compare_values(expected, out.get(x, y).unwrap_or(f64::NAN), 1e-9);
        }
    }

    // ====================================================================
    // Test 3: `none` keeps the input value wherever the window leaves the
    // matrix
    // ====================================================================
    let blurred = convolve(&ramp, &Kernel::box_kernel(3).expect("box"), BoundaryPolicy::None);
    let mut border_same = true;
    for x in 0..w {
        border_same &= blurred.get(x, 0) == ramp.get(x, 0);
        border_same &= blurred.get(x, h - 1) == ramp.get(x, h - 1);
    }
    for y in 0..h {
        border_same &= blurred.get(0, y) == ramp.get(0, y);
        border_same &= blurred.get(w - 1, y) == ramp.get(w - 1, y);
    }
    rp.compare_values(1.0, if border_same { 1.0 } else { 0.0 }, 0.0);

    // ====================================================================
    // Test 4: policies agree away from the border
    // ====================================================================
    let gauss = Kernel::gaussian(3, 0.8).expect("gaussian");
    let outs: Vec<_> = POLICIES
        .iter()
        .map(|&p| convolve(&ramp, &gauss, p))
        .collect();
    for (x, y) in interior(&ramp, &gauss) {
        let a = outs[0].get(x, y).unwrap_or(f64::NAN);
        let b = outs[1].get(x, y).unwrap_or(f64::NAN);
        let c = outs[2].get(x, y).unwrap_or(f64::NAN);
        rp.compare_values(a, b, 1e-9);
        rp.compare_values(a, c, 1e-9);
    }

    // ====================================================================
    // Test 5: every operation preserves the matrix shape
    // ====================================================================
    for policy in POLICIES {
        for kernel in &kernels {
            let out = convolve(&ramp, kernel, policy);
            rp.compare_values(1.0, if out.same_shape(&ramp) { 1.0 } else { 0.0 }, 0.0);
        }
        let out = box_blur(&ramp, 2, policy).expect("box_blur");
        rp.compare_values(1.0, if out.same_shape(&ramp) { 1.0 } else { 0.0 }, 0.0);
        let out = gaussian_blur(&ramp, 1, 1.0, policy).expect("gaussian_blur");
        rp.compare_values(1.0, if out.same_shape(&ramp) { 1.0 } else { 0.0 }, 0.0);
    }

    // ====================================================================
    // Test 6: boundary policies parse from their string names
    // ====================================================================
    for (name, policy) in [
        ("none", BoundaryPolicy::None),
        ("zero-pad", BoundaryPolicy::Zero),
        ("replicate", BoundaryPolicy::Replicate),
    ] {
        let parsed: BoundaryPolicy = name.parse().expect("parse policy");
        rp.compare_values(1.0, if parsed == policy { 1.0 } else { 0.0 }, 0.0);
    }

    assert!(rp.cleanup(), "convolve regression test failed");
}

#[test]
fn convolve_replicate_edges() {
    let mut rp = RegParams::new("convolve_replicate");

    // A column-constant ramp stays column-constant under replicate
    // padding, and its vertical-edge response is flat across rows
    let ramp = load_test_matrix("ramp.txt").expect("load ramp.txt");
    let (w, h) = ramp.dimensions();
    let out = convolve(&ramp, &Kernel::sobel_vertical(), BoundaryPolicy::Replicate);
    for x in 0..w {
        let top = out.get(x, 0).unwrap_or(f64::NAN);
        for y in 1..h {
            rp.compare_values(top, out.get(x, y).unwrap_or(f64::NAN), 1e-9);
        }
    }

    assert!(rp.cleanup(), "convolve replicate regression test failed");
}
