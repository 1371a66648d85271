//! Winding classification via the shoelace formula.
//!
//! Loops stay on the integer lattice through every stage, so the doubled area
//! is computed exactly in `i64` and halved only at the end.

use nalgebra::Vector2;

use crate::geom::{Loop, Pt, RegionKind};

/// Twice the signed area, exact.
pub fn twice_signed_area(points: &[Pt]) -> i64 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    (0..n)
        .map(|i| {
            let a = widen(points[i]);
            let b = widen(points[(i + 1) % n]);
            a.perp(&b)
        })
        .sum()
}

/// Signed area: negative for clockwise loops under the y-down convention.
pub fn oriented_area(lp: &Loop) -> f64 {
    twice_signed_area(&lp.points) as f64 * 0.5
}

/// `area < 0` is an inclusion; everything else (holes and degenerate loops)
/// an exclusion.
#[inline]
pub fn classify(area: f64) -> RegionKind {
    if area < 0.0 {
        RegionKind::Inclusion
    } else {
        RegionKind::Exclusion
    }
}

#[inline]
fn widen(p: Pt) -> Vector2<i64> {
    Vector2::new(i64::from(p.x), i64::from(p.y))
}
