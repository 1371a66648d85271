//! Collinear point removal.
//!
//! A point is redundant when the direction into it and the direction out of
//! it agree within `ANGLE_EPS` radians; zero-length steps (repeated points)
//! are always redundant. The loop is treated cyclically and never shrinks
//! below three points.

use crate::geom::{Loop, Pt};

/// Angular tolerance for "same direction".
pub const ANGLE_EPS: f64 = 1e-4;

/// Remove every redundant point. Idempotent.
pub fn reduce(lp: &Loop) -> Loop {
    let n = lp.len();
    if n <= 3 {
        return lp.clone();
    }
    let mut out: Vec<Pt> = Vec::with_capacity(n);
    for (i, &p) in lp.points.iter().enumerate() {
        // Points still to come, `p` included; keeps the result at >= 3 points.
        let ahead = n - i;
        while out.len() >= 2
            && out.len() - 1 + ahead >= 3
            && redundant(out[out.len() - 2], out[out.len() - 1], p)
        {
            out.pop();
        }
        if out.last() == Some(&p) && out.len() + ahead > 3 {
            continue;
        }
        out.push(p);
    }
    // Close the seam: the last point and the first may each sit on a straight
    // run that continues across the wrap.
    loop {
        let n = out.len();
        if n <= 3 {
            break;
        }
        if out[n - 1] == out[0] || redundant(out[n - 2], out[n - 1], out[0]) {
            out.pop();
        } else if redundant(out[n - 1], out[0], out[1]) {
            out.remove(0);
        } else {
            break;
        }
    }
    Loop::new(out)
}

/// `cur` adds nothing between `prev` and `next`.
fn redundant(prev: Pt, cur: Pt, next: Pt) -> bool {
    match (direction(prev, cur), direction(cur, next)) {
        (Some(a), Some(b)) => angle_between(a, b) < ANGLE_EPS,
        _ => true,
    }
}

fn direction(a: Pt, b: Pt) -> Option<f64> {
    let d = b - a;
    if d.x == 0 && d.y == 0 {
        return None;
    }
    Some(f64::from(d.y).atan2(f64::from(d.x)))
}

/// Absolute difference of two angles, wrapped into `[0, π]`.
fn angle_between(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % std::f64::consts::TAU;
    d.min(std::f64::consts::TAU - d)
}
