//! Label raster → classified boundary polygons.
//!
//! Stages (leaf first):
//! - `edges::extract`: oriented unit edges per label.
//! - `assemble::assemble`: chain a label's edges into closed loops.
//! - `reduce::reduce`: drop collinear points.
//! - `simplify::simplify`: Ramer–Douglas–Peucker with a distance tolerance.
//! - `orient`: signed area → inclusion / exclusion.
//! - `pipeline::process`: run all of the above per label, in parallel.
//!
//! `boxes` offers a rectangle-cover alternative to traced polygons and
//! `synth` draws reproducible test rasters.
//!
//! Conventions
//! - Pixel `(x, y)` spans the corners `(x, y)..(x+1, y+1)`; `y` grows downward.
//! - Inclusion loops run clockwise on screen (negative shoelace area).

pub mod assemble;
pub mod boxes;
pub mod edges;
pub mod error;
pub mod geom;
pub mod orient;
pub mod pipeline;
pub mod raster;
pub mod reduce;
pub mod simplify;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};
pub use geom::{Edge, Loop, Polygon, Pt, RegionKind};
pub use pipeline::{
    process, process_with_cancel, process_with_progress, Background, CancelToken, PipelineCfg,
    PipelineOutput, ZeroAreaPolicy,
};
pub use raster::{Label, Raster};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::boxes::{decompose, decompose_all, LabelBox};
    pub use crate::pipeline::{
        process, process_with_cancel, process_with_progress, Background, CancelToken, PipelineCfg,
        PipelineOutput, ZeroAreaPolicy,
    };
    pub use crate::simplify::DEFAULT_TOLERANCE;
    pub use crate::synth::{voronoi_labels, ReplayToken, SiteCount, SynthCfg};
    pub use crate::{Error, Label, Polygon, Pt, Raster, RegionKind};
}
