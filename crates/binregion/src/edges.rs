//! Boundary edge extraction.
//!
//! Each pixel emits one oriented unit edge per side whose neighbour carries a
//! different label or lies outside the raster. The fixed side→edge table makes
//! every label's edges run clockwise (y down), so they chain head to tail:
//!
//! - bottom: `(x,y+1) → (x+1,y+1)`
//! - top:    `(x+1,y) → (x,y)`
//! - right:  `(x+1,y+1) → (x+1,y)`
//! - left:   `(x,y) → (x,y+1)`
//!
//! A side shared by two labels is emitted twice, once into each label's set.

use std::collections::BTreeMap;

use crate::geom::Edge;
use crate::raster::{Label, Raster};

/// Unordered boundary edges per label, in raster scan order.
pub type EdgeMap = BTreeMap<Label, Vec<Edge>>;

/// Single pass over the raster collecting every label's boundary edges.
pub fn extract(raster: &Raster) -> EdgeMap {
    let mut out: EdgeMap = BTreeMap::new();
    let (w, h) = (raster.width() as i64, raster.height() as i64);
    for y in 0..h {
        for x in 0..w {
            let v = raster.get(x as usize, y as usize);
            let differs = |nx: i64, ny: i64| raster.label_at(nx, ny) != Some(v);
            let edges = out.entry(v).or_default();
            // Raster::new bounds dimensions to i32, so the casts are lossless.
            let (xi, yi) = (x as i32, y as i32);
            if differs(x, y + 1) {
                edges.push(Edge::new(xi, yi + 1, xi + 1, yi + 1));
            }
            if differs(x, y - 1) {
                edges.push(Edge::new(xi + 1, yi, xi, yi));
            }
            if differs(x + 1, y) {
                edges.push(Edge::new(xi + 1, yi + 1, xi + 1, yi));
            }
            if differs(x - 1, y) {
                edges.push(Edge::new(xi, yi, xi, yi + 1));
            }
        }
    }
    out
}
