//! Per-label orchestration: extract → assemble → reduce → simplify → orient.
//!
//! Purpose
//! - Turn a label raster into classified polygons, one list per label.
//! - Isolate failures: a label whose edges do not close is reported in
//!   `PipelineOutput::failures` and the run carries on.
//!
//! Concurrency
//! - Edges are extracted in one pass; afterwards each label's chain is
//!   independent. Labels are dealt round-robin to scoped workers that own
//!   their edge sets; the orchestrator merges the per-worker results.
//! - A `CancelToken` is polled between labels.

mod cfg;

pub use cfg::{Background, CancelToken, PipelineCfg, ZeroAreaPolicy};

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::assemble::assemble;
use crate::edges::extract;
use crate::error::{Error, Result};
use crate::geom::{Edge, Loop, Polygon};
use crate::orient::{classify, oriented_area};
use crate::raster::{Label, Raster};
use crate::reduce::reduce;
use crate::simplify::simplify;

/// Result of a full run.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Polygons per traced label (possibly empty if every loop was dropped).
    pub polygons: BTreeMap<Label, Vec<Polygon>>,
    /// Labels whose processing failed.
    pub failures: BTreeMap<Label, Error>,
    /// Loops dropped as `EmptyLoop`, per label (only labels with drops).
    pub dropped: BTreeMap<Label, usize>,
}

impl PipelineOutput {
    /// Total number of emitted polygons.
    pub fn polygon_count(&self) -> usize {
        self.polygons.values().map(Vec::len).sum()
    }
}

/// Polygons and drop count for one label.
#[derive(Debug, Default)]
pub struct LabelPolygons {
    pub polygons: Vec<Polygon>,
    pub dropped: usize,
}

/// Run the whole pipeline.
pub fn process(raster: &Raster, cfg: &PipelineCfg) -> Result<PipelineOutput> {
    process_with_cancel(raster, cfg, &CancelToken::new())
}

/// Run the whole pipeline, stopping with `Error::Cancelled` once `cancel` fires.
pub fn process_with_cancel(
    raster: &Raster,
    cfg: &PipelineCfg,
    cancel: &CancelToken,
) -> Result<PipelineOutput> {
    process_with_progress(raster, cfg, cancel, &|_| {})
}

/// Like [`process_with_cancel`], calling `progress` after each label finishes
/// (from whichever worker traced it).
pub fn process_with_progress(
    raster: &Raster,
    cfg: &PipelineCfg,
    cancel: &CancelToken,
    progress: &(dyn Fn(Label) + Sync),
) -> Result<PipelineOutput> {
    cfg.validate()?;
    let jobs: Vec<(Label, Vec<Edge>)> = extract(raster)
        .into_iter()
        .filter(|(label, _)| !cfg.background.is_background(*label))
        .collect();
    let workers = cfg.worker_count(jobs.len());
    debug!(labels = jobs.len(), workers, "tracing labels");

    let results = if workers <= 1 {
        run_jobs(jobs, cfg, cancel, progress)?
    } else {
        let mut buckets: Vec<Vec<(Label, Vec<Edge>)>> = (0..workers).map(|_| Vec::new()).collect();
        for (i, job) in jobs.into_iter().enumerate() {
            buckets[i % workers].push(job);
        }
        let per_worker: Vec<Result<Vec<(Label, Result<LabelPolygons>)>>> =
            std::thread::scope(|s| {
                let handles: Vec<_> = buckets
                    .into_iter()
                    .map(|bucket| s.spawn(move || run_jobs(bucket, cfg, cancel, progress)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                    .collect()
            });
        let mut merged = Vec::new();
        for r in per_worker {
            merged.extend(r?);
        }
        merged
    };

    let mut out = PipelineOutput::default();
    for (label, res) in results {
        match res {
            Ok(lp) => {
                if lp.dropped > 0 {
                    out.dropped.insert(label, lp.dropped);
                }
                out.polygons.insert(label, lp.polygons);
            }
            Err(e) => {
                let label = e.label().unwrap_or(label);
                warn!(label, error = %e, "label failed");
                out.failures.insert(label, e);
            }
        }
    }
    Ok(out)
}

fn run_jobs(
    jobs: Vec<(Label, Vec<Edge>)>,
    cfg: &PipelineCfg,
    cancel: &CancelToken,
    progress: &(dyn Fn(Label) + Sync),
) -> Result<Vec<(Label, Result<LabelPolygons>)>> {
    let mut out = Vec::with_capacity(jobs.len());
    for (label, edges) in jobs {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        out.push((label, process_label(label, &edges, cfg)));
        progress(label);
    }
    Ok(out)
}

/// Assemble, reduce, simplify and classify one label's edge set.
pub fn process_label(label: Label, edges: &[Edge], cfg: &PipelineCfg) -> Result<LabelPolygons> {
    let loops = assemble(label, edges)?;
    let mut res = LabelPolygons::default();
    for lp in &loops {
        match classify_loop(label, lp, cfg) {
            Ok(poly) => res.polygons.push(poly),
            Err(skip @ Error::EmptyLoop { .. }) => {
                warn!(%skip, "dropping loop");
                res.dropped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    debug!(
        label,
        edges = edges.len(),
        loops = loops.len(),
        kept = res.polygons.len(),
        dropped = res.dropped,
        "label traced"
    );
    Ok(res)
}

/// Reduce, simplify and orient a single assembled loop.
pub fn classify_loop(label: Label, lp: &Loop, cfg: &PipelineCfg) -> Result<Polygon> {
    let simplified = simplify(&reduce(lp), cfg.tolerance);
    if simplified.len() < 3 {
        return Err(Error::EmptyLoop {
            label,
            points: simplified.len(),
        });
    }
    let area = oriented_area(&simplified);
    if area == 0.0 && cfg.zero_area == ZeroAreaPolicy::Drop {
        return Err(Error::EmptyLoop {
            label,
            points: simplified.len(),
        });
    }
    Ok(Polygon {
        label,
        points: simplified.points,
        kind: classify(area),
        area,
    })
}

#[cfg(test)]
mod tests;
