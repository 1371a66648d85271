//! Immutable 2D label raster (row-major, origin at the top-left pixel).
//!
//! Construction validates shape once; every consumer downstream can index
//! without re-checking.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Integer region identifier ("bin").
pub type Label = i32;

/// Rectangular, non-empty grid of labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<Label>,
}

impl Raster {
    /// Build from a row-major buffer. Rejects empty shapes and length mismatches.
    pub fn new(width: usize, height: usize, data: Vec<Label>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid(format!(
                "raster must be non-empty (got {width}x{height})"
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::invalid(format!("raster dimensions {width}x{height} overflow"))
        })?;
        if data.len() != expected {
            return Err(Error::invalid(format!(
                "raster buffer holds {} labels, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(Error::invalid(format!(
                "raster {width}x{height} exceeds the lattice coordinate range"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from rows; all rows must have the same non-zero length.
    pub fn from_rows<R>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<[Label]>,
    {
        let mut data = Vec::new();
        let mut width = None;
        let mut height = 0usize;
        for (y, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(Error::invalid(format!(
                        "raster is not rectangular: row {y} has {} labels, row 0 has {w}",
                        row.len()
                    )));
                }
                Some(_) => {}
            }
            data.extend_from_slice(row);
            height += 1;
        }
        Self::new(width.unwrap_or(0), height, data)
    }

    /// Raster of one repeated label.
    pub fn filled(width: usize, height: usize, label: Label) -> Result<Self> {
        Self::new(width, height, vec![label; width.saturating_mul(height)])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Label at `(x, y)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Label {
        assert!(x < self.width && y < self.height, "({x},{y}) outside raster");
        self.data[y * self.width + x]
    }

    /// Label at signed coordinates; `None` outside the raster.
    #[inline]
    pub fn label_at(&self, x: i64, y: i64) -> Option<Label> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, label: Label) {
        self.data[y * self.width + x] = label;
    }

    /// Row-major label buffer.
    pub fn as_slice(&self) -> &[Label] {
        &self.data
    }

    /// Distinct labels present, ascending.
    pub fn labels(&self) -> BTreeSet<Label> {
        self.data.iter().copied().collect()
    }
}
