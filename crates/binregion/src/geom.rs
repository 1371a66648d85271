//! Lattice geometry shared by the pipeline stages.
//!
//! - `Pt`: pixel-corner coordinate (`x` right, `y` down).
//! - `Edge`: one oriented unit side of a pixel.
//! - `Loop`: closed point sequence (implicit edge from last back to first).
//! - `Polygon`: classified loop for one label.

use nalgebra::Vector2;

use crate::raster::Label;

/// Pixel-corner lattice point.
pub type Pt = Vector2<i32>;

/// Oriented unit-length pixel side `from → to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: Pt,
    pub to: Pt,
}

impl Edge {
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            from: Pt::new(x1, y1),
            to: Pt::new(x2, y2),
        }
    }
}

/// Closed polygonal chain of lattice points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loop {
    pub points: Vec<Pt>,
}

impl Loop {
    #[inline]
    pub fn new(points: Vec<Pt>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same loop traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Sides of the loop including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Edge {
            from: self.points[i],
            to: self.points[(i + 1) % n],
        })
    }
}

/// Region role decided by winding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Clockwise (negative area, y down): solid boundary.
    Inclusion,
    /// Counter-clockwise or degenerate: hole.
    Exclusion,
}

/// Final per-label output record.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub label: Label,
    pub points: Vec<Pt>,
    pub kind: RegionKind,
    /// Signed shoelace area (negative for inclusions).
    pub area: f64,
}

#[inline]
pub(crate) fn to_f64(p: Pt) -> Vector2<f64> {
    Vector2::new(f64::from(p.x), f64::from(p.y))
}
