//! Trace a synthetic Voronoi label map and print per-label polygon counts.
//!
//! Usage:
//!   cargo run -p binregion --example trace_synth -- [seed] [tolerance]

use binregion::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let tolerance: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TOLERANCE);

    let raster = match voronoi_labels(SynthCfg::default(), ReplayToken::new(seed)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("synth failed: {e}");
            return;
        }
    };
    let cfg = PipelineCfg {
        tolerance,
        ..PipelineCfg::default()
    };
    let out = match process(&raster, &cfg) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("pipeline failed: {e}");
            return;
        }
    };
    for (label, polys) in &out.polygons {
        let holes = polys
            .iter()
            .filter(|p| p.kind == RegionKind::Exclusion)
            .count();
        let vertices: usize = polys.iter().map(|p| p.points.len()).sum();
        println!(
            "label {label}: {} polygon(s), {holes} hole(s), {vertices} vertices",
            polys.len()
        );
    }
    for (label, n) in &out.dropped {
        println!("label {label}: dropped {n} collapsed loop(s)");
    }
}
