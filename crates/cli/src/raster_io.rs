//! Raster loading for the CLI: header-less CSV grids (polars) and JSON row
//! arrays (serde_json), plus CSV export for synthetic rasters.

use anyhow::{anyhow, bail, Context, Result};
use binregion::{Label, Raster};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Load a label raster, picking the reader from the file extension.
pub fn load(path: &Path) -> Result<Raster> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => bail!(
            "unsupported raster format {} (expected .csv or .json)",
            path.display()
        ),
    }
}

fn load_csv(path: &Path) -> Result<Raster> {
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("opening {}", path.display()))?
        .finish()
        .with_context(|| format!("reading {}", path.display()))?;
    raster_from_frame(&df).with_context(|| format!("decoding raster from {}", path.display()))
}

fn raster_from_frame(df: &DataFrame) -> Result<Raster> {
    let (height, width) = df.shape();
    let mut columns = Vec::with_capacity(width);
    for (x, s) in df.iter().enumerate() {
        if !s.dtype().is_integer() {
            bail!("column {x} holds {} values, expected integer labels", s.dtype());
        }
        columns.push(s.cast(&DataType::Int32)?);
    }
    let mut data: Vec<Label> = Vec::with_capacity(width * height);
    for y in 0..height {
        for (x, s) in columns.iter().enumerate() {
            let v = s
                .i32()?
                .get(y)
                .ok_or_else(|| anyhow!("missing label at row {y}, column {x}"))?;
            data.push(v);
        }
    }
    Ok(Raster::new(width, height, data)?)
}

fn load_json(path: &Path) -> Result<Raster> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<Vec<Label>> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {} as an array of label rows", path.display()))?;
    Raster::from_rows(rows).with_context(|| format!("decoding raster from {}", path.display()))
}

/// Write `raster` as a header-less CSV grid readable by [`load`].
pub fn save_csv(raster: &Raster, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let columns: Vec<Series> = (0..raster.width())
        .map(|x| {
            let col: Vec<Label> = (0..raster.height()).map(|y| raster.get(x, y)).collect();
            Series::new(format!("c{x}").into(), col)
        })
        .collect();
    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(false)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_grid_loads_row_major() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bins.csv");
        fs::write(&path, "-1,0,0\n-1,1,1\n").unwrap();
        let r = load(&path).unwrap();
        assert_eq!((r.width(), r.height()), (3, 2));
        assert_eq!(r.as_slice(), &[-1, 0, 0, -1, 1, 1]);
    }

    #[test]
    fn json_rows_load_and_ragged_rows_fail() {
        let dir = tempdir().unwrap();
        let ok = dir.path().join("ok.json");
        fs::write(&ok, "[[1,2],[3,4]]").unwrap();
        assert_eq!(load(&ok).unwrap().as_slice(), &[1, 2, 3, 4]);

        let ragged = dir.path().join("ragged.json");
        fs::write(&ragged, "[[1,2],[3]]").unwrap();
        let err = load(&ragged).unwrap_err();
        assert!(format!("{err:#}").contains("not rectangular"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load(Path::new("bins.fits")).unwrap_err();
        assert!(err.to_string().contains("unsupported raster format"));
    }

    #[test]
    fn saved_csv_reloads_identically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/synth.csv");
        let r = Raster::from_rows([[0, 1, -1], [2, 2, 5]]).unwrap();
        save_csv(&r, &path).unwrap();
        assert_eq!(load(&path).unwrap(), r);
    }
}
