//! Greedy rectangle cover of a label's pixels.
//!
//! Alternative region output to traced polygons: every pixel of the label is
//! covered by exactly one axis-aligned box. Scanning row-major, each unclaimed
//! pixel seeds a 1×1 box that grows while the next row segment (down) or the
//! next column segment (right) lies fully inside the label. If both can grow
//! but the diagonal corner pixel is outside, only the width grows.

use std::collections::BTreeMap;

use crate::pipeline::Background;
use crate::raster::{Label, Raster};

/// Axis-aligned box in pixel units, `(x, y)` its top-left pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelBox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl LabelBox {
    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }
}

/// Cover all pixels of `label`. Empty if the label is absent.
pub fn decompose(raster: &Raster, label: Label) -> Vec<LabelBox> {
    let (iw, ih) = (raster.width(), raster.height());
    let mut open: Vec<bool> = raster.as_slice().iter().map(|&v| v == label).collect();
    let at = |open: &[bool], x: usize, y: usize| open[y * iw + x];
    let mut out = Vec::new();

    for y in 0..ih {
        for x in 0..iw {
            if !at(&open, x, y) {
                continue;
            }
            let (mut w, mut h) = (1usize, 1usize);
            loop {
                let grow_down = y + h < ih && (0..w).all(|xi| at(&open, x + xi, y + h));
                let grow_right = x + w < iw && (0..h).all(|yi| at(&open, x + w, y + yi));
                let corner = x + w < iw && y + h < ih && at(&open, x + w, y + h);
                if !grow_down && !grow_right {
                    break;
                }
                if grow_down && grow_right && !corner {
                    w += 1;
                } else {
                    if grow_right {
                        w += 1;
                    }
                    if grow_down {
                        h += 1;
                    }
                }
            }
            for yi in 0..h {
                for xi in 0..w {
                    open[(y + yi) * iw + x + xi] = false;
                }
            }
            out.push(LabelBox { x, y, w, h });
        }
    }
    out
}

/// Box cover for every non-background label.
pub fn decompose_all(raster: &Raster, background: Background) -> BTreeMap<Label, Vec<LabelBox>> {
    raster
        .labels()
        .into_iter()
        .filter(|&l| !background.is_background(l))
        .map(|l| (l, decompose(raster, l)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_block_is_one_box() {
        let r = Raster::filled(4, 3, 2).unwrap();
        assert_eq!(decompose(&r, 2), vec![LabelBox { x: 0, y: 0, w: 4, h: 3 }]);
        assert!(decompose(&r, 5).is_empty());
    }

    #[test]
    fn l_shape_prefers_width_at_missing_corner() {
        // 1 1
        // 1 .
        let r = Raster::from_rows([[1, 1], [1, 0]]).unwrap();
        assert_eq!(
            decompose(&r, 1),
            vec![
                LabelBox { x: 0, y: 0, w: 2, h: 1 },
                LabelBox { x: 0, y: 1, w: 1, h: 1 },
            ]
        );
    }

    #[test]
    fn boxes_cover_each_pixel_once() {
        let r = Raster::from_rows([
            [1, 1, 0, 1],
            [1, 1, 1, 1],
            [0, 1, 1, 0],
            [1, 1, 0, 0],
        ])
        .unwrap();
        let boxes = decompose(&r, 1);
        let mut hits = vec![0u8; 16];
        for b in &boxes {
            for y in b.y..b.y + b.h {
                for x in b.x..b.x + b.w {
                    assert_eq!(r.get(x, y), 1);
                    hits[y * 4 + x] += 1;
                }
            }
        }
        for (i, &v) in r.as_slice().iter().enumerate() {
            assert_eq!(hits[i], u8::from(v == 1), "pixel {i}");
        }
    }

    #[test]
    fn background_labels_are_skipped() {
        let r = Raster::from_rows([[-1, 0], [3, 3]]).unwrap();
        let all = decompose_all(&r, Background::Negative);
        assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(all[&3], vec![LabelBox { x: 0, y: 1, w: 2, h: 1 }]);
    }
}
