//! Hit-miss transform regression test
//!
//! Tests exact pattern matching with separate hit and miss elements,
//! out-of-bounds handling, and isolated-pixel detection on a fixture glyph.
//!
//! Run with:
//! ```
//! cargo test -p rasterkit-morph --test hitmiss_reg
//! ```

use rasterkit_core::BinaryMatrix;
use rasterkit_morph::{MorphError, Sel, hit_miss_transform};
use rasterkit_test::{RegParams, load_test_binary};

fn plus_hit() -> Sel {
    Sel::from_rows(vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]).expect("hit")
}

fn plus_miss() -> Sel {
    Sel::from_rows(vec![vec![1, 0, 1], vec![0, 0, 0], vec![1, 0, 1]]).expect("miss")
}

#[test]
fn hitmiss_reg() {
    let mut rp = RegParams::new("hitmiss");

    // ====================================================================
    // Test 1-2: a matrix shaped exactly as a plus matches at its center
    // ====================================================================
    let plus = BinaryMatrix::from_rows(vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]])
        .expect("plus");
    let out = hit_miss_transform(&plus, &plus_hit(), &plus_miss()).expect("hmt");
    rp.compare_values(1.0, out.count_foreground() as f64, 0.0);
    rp.compare_values(1.0, f64::from(out.get(1, 1).unwrap_or(0)), 0.0);

    // ====================================================================
    // Test 3: all-ones input violates the background corners everywhere
    // ====================================================================
    let ones = BinaryMatrix::new_filled(5, 5).expect("ones");
    let out = hit_miss_transform(&ones, &plus_hit(), &plus_miss()).expect("hmt");
    rp.compare_values(0.0, out.count_foreground() as f64, 0.0);

    // ====================================================================
    // Test 4-5: hit-only SEL reduces to erosion; a plus embedded in a
    // larger background matches once
    // ====================================================================
    let empty_miss = Sel::new(3, 3).expect("empty");
    let out = hit_miss_transform(&ones, &plus_hit(), &empty_miss).expect("hmt");
    rp.compare_binary(&out, &rasterkit_morph::erode(&ones, &plus_hit()));

    let embedded = BinaryMatrix::from_fn(7, 7, |x, y| {
        (x == 3 && (2..=4).contains(&y)) || (y == 3 && (2..=4).contains(&x))
    })
    .expect("embedded");
    let out = hit_miss_transform(&embedded, &plus_hit(), &plus_miss()).expect("hmt");
    let single = out.is_set(3, 3) && out.count_foreground() == 1;
    rp.compare_values(1.0, if single { 1.0 } else { 0.0 }, 0.0);

    // ====================================================================
    // Test 6-8: isolated pixels of the fixture glyph
    // ====================================================================
    let pixs = load_test_binary("x_glyph.txt").expect("load x_glyph.txt");
    let dot = Sel::from_string("...\n.x.\n...").expect("dot");
    let isolated = hit_miss_transform(&pixs, &dot, &dot.complement()).expect("hmt");
    rp.write_binary_and_check(&isolated).expect("write isolated");
    rp.compare_values(1.0, isolated.count_foreground() as f64, 0.0);
    rp.compare_values(1.0, if isolated.is_subset_of(&pixs) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "hitmiss regression test failed");
}

#[test]
fn hitmiss_invalid_input() {
    let pixs = BinaryMatrix::new_filled(4, 4).expect("pixs");

    // Hit and miss must have the same size
    let hit = Sel::create_brick(3, 3).expect("hit");
    let miss = Sel::new(3, 2).expect("miss");
    assert!(matches!(
        hit_miss_transform(&pixs, &hit, &miss),
        Err(MorphError::Core(rasterkit_core::Error::ShapeMismatch(_)))
    ));

    // Overlapping positions can never be satisfied
    let overlap = hit_miss_transform(&pixs, &hit, &hit).expect("hmt");
    assert_eq!(overlap.count_foreground(), 0);
    let overlap = hit_miss_transform(&pixs.invert(), &hit, &hit).expect("hmt");
    assert_eq!(overlap.count_foreground(), 0);

    // Structuring elements only accept 0 and 1
    assert!(matches!(
        Sel::from_rows(vec![vec![0, 1, 0], vec![1, -1, 1]]),
        Err(MorphError::Core(rasterkit_core::Error::InvalidValue {
            x: 1,
            y: 1,
            value: -1
        }))
    ));
}
