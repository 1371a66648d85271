//! Region-file rendering: one text file per label, one shape per line.
//!
//! Lattice points map to output coordinates as `min + binning * (p + 0.5)`,
//! which centres raster-cell coordinates on pixel centres; box centres use
//! `min + binning * (x + w/2)` without that shift. Inclusion polygons
//! come first; exclusion polygons follow, each prefixed with `-`.

use anyhow::{Context, Result};
use binregion::boxes::LabelBox;
use binregion::{Label, Polygon, Pt, RegionKind};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "# Region file format: CIAO version 1.0";

/// Raster → output coordinate mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionTransform {
    pub min_x: f64,
    pub min_y: f64,
    pub binning: f64,
}

impl Default for RegionTransform {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            binning: 1.0,
        }
    }
}

impl RegionTransform {
    #[inline]
    pub fn map(&self, p: Pt) -> (f64, f64) {
        (
            self.min_x + self.binning * (f64::from(p.x) + 0.5),
            self.min_y + self.binning * (f64::from(p.y) + 0.5),
        )
    }
}

/// `polygon(x1,y1,...)`, prefixed with `-` for exclusions.
pub fn polygon_line(poly: &Polygon, t: &RegionTransform) -> String {
    let mut line = String::new();
    if poly.kind == RegionKind::Exclusion {
        line.push('-');
    }
    line.push_str("polygon(");
    for (i, &p) in poly.points.iter().enumerate() {
        let (x, y) = t.map(p);
        if i > 0 {
            line.push(',');
        }
        let _ = write!(line, "{x},{y}");
    }
    line.push(')');
    line
}

/// `rotbox(cx,cy,w,h,0)` with centre `min + binning * (x + w/2)`.
pub fn box_line(b: &LabelBox, t: &RegionTransform) -> String {
    let cx = t.min_x + t.binning * (b.x as f64 + b.w as f64 * 0.5);
    let cy = t.min_y + t.binning * (b.y as f64 + b.h as f64 * 0.5);
    format!(
        "rotbox({cx},{cy},{},{},0)",
        t.binning * b.w as f64,
        t.binning * b.h as f64
    )
}

/// Full file body for one label's polygons.
pub fn render_polygons(polys: &[Polygon], t: &RegionTransform, header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(HEADER);
        out.push('\n');
    }
    for kind in [RegionKind::Inclusion, RegionKind::Exclusion] {
        for p in polys.iter().filter(|p| p.kind == kind) {
            out.push_str(&polygon_line(p, t));
            out.push('\n');
        }
    }
    out
}

/// Full file body for one label's boxes.
pub fn render_boxes(boxes: &[LabelBox], t: &RegionTransform, header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(HEADER);
        out.push('\n');
    }
    for b in boxes {
        out.push_str(&box_line(b, t));
        out.push('\n');
    }
    out
}

pub fn file_name(label: Label) -> String {
    format!("xaf_{label}.reg")
}

/// Write `body` to `<dir>/xaf_<label>.reg`.
pub fn write_label_file(dir: &Path, label: Label, body: &str) -> Result<PathBuf> {
    let path = dir.join(file_name(label));
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
