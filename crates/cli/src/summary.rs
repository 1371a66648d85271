//! Per-shape summary table (`summary.csv`) written through polars.

use anyhow::{Context, Result};
use binregion::boxes::LabelBox;
use binregion::{Label, Polygon, RegionKind};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// One emitted shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub label: Label,
    pub index: u32,
    pub kind: &'static str,
    pub vertices: u32,
    pub area: f64,
}

pub fn polygon_rows(polygons: &BTreeMap<Label, Vec<Polygon>>, binning: f64) -> Vec<Row> {
    let mut rows = Vec::new();
    for (&label, polys) in polygons {
        for (i, p) in polys.iter().enumerate() {
            rows.push(Row {
                label,
                index: i as u32,
                kind: match p.kind {
                    RegionKind::Inclusion => "inclusion",
                    RegionKind::Exclusion => "exclusion",
                },
                vertices: p.points.len() as u32,
                area: p.area.abs() * binning * binning,
            });
        }
    }
    rows
}

pub fn box_rows(boxes: &BTreeMap<Label, Vec<LabelBox>>, binning: f64) -> Vec<Row> {
    let mut rows = Vec::new();
    for (&label, bs) in boxes {
        for (i, b) in bs.iter().enumerate() {
            rows.push(Row {
                label,
                index: i as u32,
                kind: "box",
                vertices: 4,
                area: b.area() as f64 * binning * binning,
            });
        }
    }
    rows
}

/// Write rows as CSV with a header line.
pub fn write(rows: &[Row], path: &Path) -> Result<()> {
    let mut df = df!(
        "label" => rows.iter().map(|r| r.label).collect::<Vec<_>>(),
        "index" => rows.iter().map(|r| r.index).collect::<Vec<_>>(),
        "kind" => rows.iter().map(|r| r.kind).collect::<Vec<_>>(),
        "vertices" => rows.iter().map(|r| r.vertices).collect::<Vec<_>>(),
        "area" => rows.iter().map(|r| r.area).collect::<Vec<_>>(),
    )?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binregion::Pt;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rows_report_unsigned_scaled_area() {
        let mut polys = BTreeMap::new();
        polys.insert(
            3,
            vec![Polygon {
                label: 3,
                points: vec![Pt::new(1, 0), Pt::new(0, 0), Pt::new(0, 1), Pt::new(1, 1)],
                kind: RegionKind::Inclusion,
                area: -1.0,
            }],
        );
        let rows = polygon_rows(&polys, 2.0);
        assert_eq!(
            rows,
            vec![Row {
                label: 3,
                index: 0,
                kind: "inclusion",
                vertices: 4,
                area: 4.0
            }]
        );
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let mut boxes = BTreeMap::new();
        boxes.insert(0, vec![LabelBox { x: 0, y: 0, w: 2, h: 3 }]);
        write(&box_rows(&boxes, 1.0), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "label,index,kind,vertices,area");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("0,0,box,4,6"));
    }
}
