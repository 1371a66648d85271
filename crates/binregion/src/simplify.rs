//! Ramer–Douglas–Peucker simplification of a loop treated as an open path.
//!
//! The first and last points are fixed; the closing side of the loop is not
//! simplified. Distances are perpendicular to the line through the chord.

use nalgebra::Vector2;

use crate::geom::{to_f64, Loop};

/// Default perpendicular-distance tolerance in raster units.
pub const DEFAULT_TOLERANCE: f64 = 4.0;

/// Simplify `lp` so that every removed point lies within `tolerance` of the
/// chord that replaced it. A large tolerance may leave only two points.
pub fn simplify(lp: &Loop, tolerance: f64) -> Loop {
    if lp.len() < 3 {
        return lp.clone();
    }
    let pts: Vec<Vector2<f64>> = lp.points.iter().map(|&p| to_f64(p)).collect();
    let keep = douglas_peucker(&pts, tolerance);
    Loop::new(
        lp.points
            .iter()
            .zip(keep)
            .filter_map(|(&p, k)| k.then_some(p))
            .collect(),
    )
}

/// Keep-mask for `points` under RDP with the given tolerance.
///
/// Iterative (explicit span stack) so very long boundaries cannot overflow
/// the call stack.
pub fn douglas_peucker(points: &[Vector2<f64>], tolerance: f64) -> Vec<bool> {
    let n = points.len();
    let mut keep = vec![false; n];
    if n == 0 {
        return keep;
    }
    keep[0] = true;
    keep[n - 1] = true;
    let mut spans = vec![(0usize, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (points[start], points[end]);
        let (mut index, mut dmax) = (start, 0.0f64);
        for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = perpendicular_distance(p, a, b);
            if d > dmax {
                index = i;
                dmax = d;
            }
        }
        if dmax > tolerance {
            keep[index] = true;
            spans.push((start, index));
            spans.push((index, end));
        }
    }
    keep
}

/// Distance from `p` to the line through `a` and `b` (to `a` when they coincide).
fn perpendicular_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len = ab.norm();
    if len < 1e-9 {
        return (p - a).norm();
    }
    ab.perp(&(p - a)).abs() / len
}
