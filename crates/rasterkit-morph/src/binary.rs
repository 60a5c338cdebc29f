//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, closing and the hit-miss
//! transform for binary matrices, plus the derived gradient and hat
//! transforms.
//!
//! Positions outside the matrix are treated asymmetrically:
//!
//! - erosion and hit-miss require every participating position to be in
//!   bounds, so any out-of-bounds position yields 0;
//! - dilation skips out-of-bounds positions.

use crate::{MorphResult, Sel};
use rasterkit_core::{BinaryMatrix, map_windows_binary};

/// Erode a binary matrix
///
/// An output cell is 1 iff every hit of the SEL, placed with its origin on
/// that cell, lands in bounds on a 1.
pub fn erode(bin: &BinaryMatrix, sel: &Sel) -> BinaryMatrix {
    let hits: Vec<(u32, u32)> = sel.hit_positions().collect();
    map_windows_binary(bin.as_matrix(), sel.window(), |nb| {
        hits.iter().all(|&(kx, ky)| nb.get(kx, ky) == Some(1))
    })
}

/// Dilate a binary matrix
///
/// An output cell is 1 iff at least one hit of the SEL lands in bounds on
/// a 1.
pub fn dilate(bin: &BinaryMatrix, sel: &Sel) -> BinaryMatrix {
    let hits: Vec<(u32, u32)> = sel.hit_positions().collect();
    map_windows_binary(bin.as_matrix(), sel.window(), |nb| {
        hits.iter().any(|&(kx, ky)| nb.get(kx, ky) == Some(1))
    })
}

/// Open a binary matrix
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(bin: &BinaryMatrix, sel: &Sel) -> BinaryMatrix {
    dilate(&erode(bin, sel), sel)
}

/// Close a binary matrix
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(bin: &BinaryMatrix, sel: &Sel) -> BinaryMatrix {
    erode(&dilate(bin, sel), sel)
}

/// Hit-miss transform
///
/// An output cell is 1 iff every hit of `hit` lands in bounds on a 1 and
/// every hit of `miss` lands in bounds on a 0. A position marked in both
/// SELs can never be satisfied.
///
/// # Errors
///
/// Returns `Core(ShapeMismatch)` if `hit` and `miss` differ in size.
pub fn hit_miss_transform(bin: &BinaryMatrix, hit: &Sel, miss: &Sel) -> MorphResult<BinaryMatrix> {
    if (hit.width(), hit.height()) != (miss.width(), miss.height()) {
        return Err(rasterkit_core::Error::ShapeMismatch(format!(
            "hit SEL is {}x{} but miss SEL is {}x{}",
            hit.width(),
            hit.height(),
            miss.width(),
            miss.height()
        ))
        .into());
    }

    let hits: Vec<(u32, u32)> = hit.hit_positions().collect();
    let misses: Vec<(u32, u32)> = miss.hit_positions().collect();

    Ok(map_windows_binary(bin.as_matrix(), hit.window(), |nb| {
        hits.iter().all(|&(kx, ky)| nb.get(kx, ky) == Some(1))
            && misses.iter().all(|&(kx, ky)| nb.get(kx, ky) == Some(0))
    }))
}

/// Morphological gradient (dilation AND NOT erosion)
///
/// Highlights edges/boundaries of objects.
pub fn gradient(bin: &BinaryMatrix, sel: &Sel) -> MorphResult<BinaryMatrix> {
    Ok(dilate(bin, sel).and_not(&erode(bin, sel))?)
}

/// White top-hat (input AND NOT opening)
///
/// Extracts foreground detail smaller than the SEL.
pub fn top_hat(bin: &BinaryMatrix, sel: &Sel) -> MorphResult<BinaryMatrix> {
    Ok(bin.and_not(&open(bin, sel))?)
}

/// Black top-hat (closing AND NOT input)
///
/// Extracts holes and gaps smaller than the SEL.
pub fn bottom_hat(bin: &BinaryMatrix, sel: &Sel) -> MorphResult<BinaryMatrix> {
    Ok(close(bin, sel).and_not(bin)?)
}

/// Erode with a `width` x `height` brick
pub fn erode_brick(bin: &BinaryMatrix, width: u32, height: u32) -> MorphResult<BinaryMatrix> {
    Ok(erode(bin, &Sel::create_brick(width, height)?))
}

/// Dilate with a `width` x `height` brick
pub fn dilate_brick(bin: &BinaryMatrix, width: u32, height: u32) -> MorphResult<BinaryMatrix> {
    Ok(dilate(bin, &Sel::create_brick(width, height)?))
}

/// Open with a `width` x `height` brick
pub fn open_brick(bin: &BinaryMatrix, width: u32, height: u32) -> MorphResult<BinaryMatrix> {
    Ok(open(bin, &Sel::create_brick(width, height)?))
}

/// Close with a `width` x `height` brick
pub fn close_brick(bin: &BinaryMatrix, width: u32, height: u32) -> MorphResult<BinaryMatrix> {
    Ok(close(bin, &Sel::create_brick(width, height)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MorphError;

    fn bin(rows: &[&[u8]]) -> BinaryMatrix {
        BinaryMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn plus() -> Sel {
        Sel::from_rows(vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]).unwrap()
    }

    #[test]
    fn test_erode_boundary_is_background() {
        let full = BinaryMatrix::new_filled(4, 3).unwrap();
        let sel = Sel::create_brick(3, 3).unwrap();
        let out = erode(&full, &sel);
        assert_eq!(
            out.to_rows(),
            vec![vec![0, 0, 0, 0], vec![0, 1, 1, 0], vec![0, 0, 0, 0]]
        );
    }

    #[test]
    fn test_dilate_skips_out_of_bounds() {
        let m = bin(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        let out = dilate(&m, &plus());
        assert_eq!(out.to_rows(), vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]);

        // A corner pixel still grows inward
        let corner = bin(&[&[1, 0], &[0, 0]]);
        let out = dilate(&corner, &Sel::create_brick(3, 3).unwrap());
        assert_eq!(out.count_foreground(), 4);
    }

    #[test]
    fn test_asymmetric_sel() {
        // Single hit one column to the left of the origin
        let sel = Sel::from_rows(vec![vec![1, 0, 0]]).unwrap();
        let m = bin(&[&[1, 0, 1, 1]]);
        // erode: out[x] = in[x - 1]; x = 0 reads outside
        assert_eq!(erode(&m, &sel).to_rows(), vec![vec![0, 1, 0, 1]]);
        // dilate uses the same offsets
        assert_eq!(dilate(&m, &sel).to_rows(), vec![vec![0, 1, 0, 1]]);
    }

    #[test]
    fn test_empty_sel() {
        let m = bin(&[&[1, 0], &[0, 1]]);
        let sel = Sel::new(3, 3).unwrap();
        assert_eq!(erode(&m, &sel).count_foreground(), 4);
        assert_eq!(dilate(&m, &sel).count_foreground(), 0);
    }

    #[test]
    fn test_open_removes_specks() {
        let m = bin(&[
            &[1, 0, 0, 0, 0, 0],
            &[0, 0, 1, 1, 1, 0],
            &[0, 0, 1, 1, 1, 0],
            &[0, 0, 1, 1, 1, 0],
        ]);
        let sel = Sel::create_brick(3, 3).unwrap();
        let out = open(&m, &sel);
        assert!(!out.is_set(0, 0));
        // The 3x3 block is recovered
        assert_eq!(out.count_foreground(), 9);
        assert!(out.is_subset_of(&m));
    }

    #[test]
    fn test_close_fills_hole() {
        let m = bin(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 0, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let out = close(&m, &Sel::create_brick(3, 3).unwrap());
        assert!(out.is_set(2, 2));
        assert!(m.is_subset_of(&out));
    }

    #[test]
    fn test_hit_miss_plus() {
        let m = bin(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let hit = plus();
        let miss = hit.complement();
        let out = hit_miss_transform(&m, &hit, &miss).unwrap();
        assert_eq!(out.count_foreground(), 1);
        assert!(out.is_set(2, 2));
    }

    #[test]
    fn test_hit_miss_size_mismatch() {
        let m = bin(&[&[1]]);
        let hit = Sel::create_brick(3, 3).unwrap();
        let miss = Sel::new(3, 1).unwrap();
        assert!(matches!(
            hit_miss_transform(&m, &hit, &miss),
            Err(MorphError::Core(rasterkit_core::Error::ShapeMismatch(_)))
        ));
    }

    #[test]
    fn test_gradient_and_hats() {
        let m = bin(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let sel = Sel::create_brick(3, 3).unwrap();

        let g = gradient(&m, &sel).unwrap();
        // Dilation covers everything, erosion keeps only the center
        assert_eq!(g.count_foreground(), 24);
        assert!(!g.is_set(2, 2));

        // The block survives opening unchanged
        assert_eq!(top_hat(&m, &sel).unwrap().count_foreground(), 0);
        assert_eq!(bottom_hat(&m, &sel).unwrap().count_foreground(), 0);
    }

    #[test]
    fn test_brick_helpers() {
        let m = BinaryMatrix::new_filled(5, 5).unwrap();
        assert_eq!(erode_brick(&m, 3, 3).unwrap().count_foreground(), 9);
        assert_eq!(dilate_brick(&m, 3, 1).unwrap(), m);
        assert!(open_brick(&m, 0, 3).is_err());
        assert!(close_brick(&m, 1, 1).is_ok());
    }
}
