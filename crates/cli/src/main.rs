use anyhow::{Context, Result};
use binregion::prelude::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod provenance;
mod raster_io;
mod region;
mod summary;

use region::RegionTransform;

#[derive(Parser)]
#[command(name = "binregion")]
#[command(about = "Trace label rasters into region files")]
#[command(version)]
struct Cmd {
    /// Optional run tag; propagated to provenance sidecars and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Trace every label and write one region file per label
    Regions(RegionsArgs),
    /// Write a synthetic Voronoi label raster as CSV
    Synth(SynthArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Shape {
    /// Traced, simplified boundary polygons
    Polygon,
    /// Greedy rectangle cover
    Boxes,
}

#[derive(Args, Serialize)]
struct RegionsArgs {
    /// Label raster (.csv grid or .json rows)
    #[arg(long)]
    input: PathBuf,
    /// Output directory for xaf_<label>.reg files
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Simplification tolerance in raster units
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
    /// Skip exactly this label instead of every negative label
    #[arg(long, allow_hyphen_values = true, conflicts_with = "keep_all")]
    background: Option<Label>,
    /// Trace every label, negative ones included
    #[arg(long)]
    keep_all: bool,
    /// Drop loops whose simplified area is zero
    #[arg(long)]
    drop_zero_area: bool,
    /// Worker threads (0 = available parallelism)
    #[arg(long, default_value_t = 0)]
    threads: usize,
    #[arg(long, value_enum, default_value_t = Shape::Polygon)]
    shape: Shape,
    /// Output x coordinate of the raster origin
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    minx: f64,
    /// Output y coordinate of the raster origin
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    miny: f64,
    /// Output units per raster pixel
    #[arg(long = "bin", default_value_t = 1.0)]
    binning: f64,
    /// Start each region file with a format comment line
    #[arg(long)]
    header: bool,
}

impl RegionsArgs {
    fn background(&self) -> Background {
        match (self.keep_all, self.background) {
            (true, _) => Background::None,
            (false, Some(v)) => Background::Label(v),
            (false, None) => Background::Negative,
        }
    }

    fn pipeline_cfg(&self) -> PipelineCfg {
        PipelineCfg {
            tolerance: self.tolerance,
            background: self.background(),
            zero_area: if self.drop_zero_area {
                ZeroAreaPolicy::Drop
            } else {
                ZeroAreaPolicy::Keep
            },
            threads: self.threads,
        }
    }

    fn transform(&self) -> RegionTransform {
        RegionTransform {
            min_x: self.minx,
            min_y: self.miny,
            binning: self.binning,
        }
    }
}

#[derive(Args, Serialize)]
struct SynthArgs {
    #[arg(long, default_value_t = 64)]
    width: usize,
    #[arg(long, default_value_t = 64)]
    height: usize,
    /// Number of Voronoi sites (labels)
    #[arg(long, default_value_t = 12)]
    sites: usize,
    /// Background frame width in pixels
    #[arg(long, default_value_t = 1)]
    border: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Destination CSV file
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Regions(args) => regions(&args, cmd.tag),
        Action::Synth(args) => synth(&args, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn regions(args: &RegionsArgs, tag: Option<String>) -> Result<()> {
    tracing::info!(
        input = %args.input.display(),
        out = %args.out.display(),
        shape = ?args.shape,
        tag = ?tag,
        "regions"
    );
    let raster = raster_io::load(&args.input)?;
    tracing::info!(width = raster.width(), height = raster.height(), "raster loaded");
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output dir {}", args.out.display()))?;
    let transform = args.transform();

    let (written, rows) = match args.shape {
        Shape::Polygon => {
            let progress = |label: Label| tracing::debug!(label, "label traced");
            let output =
                process_with_progress(&raster, &args.pipeline_cfg(), &CancelToken::new(), &progress)?;
            for (label, err) in &output.failures {
                tracing::warn!(label, error = %err, "label skipped");
            }
            let dropped: usize = output.dropped.values().sum();
            tracing::info!(
                labels = output.polygons.len(),
                polygons = output.polygon_count(),
                dropped,
                failed = output.failures.len(),
                "traced"
            );
            let mut written = Vec::with_capacity(output.polygons.len());
            for (&label, polys) in &output.polygons {
                let body = region::render_polygons(polys, &transform, args.header);
                written.push(region::write_label_file(&args.out, label, &body)?);
            }
            (written, summary::polygon_rows(&output.polygons, args.binning))
        }
        Shape::Boxes => {
            let boxes = decompose_all(&raster, args.background());
            let mut written = Vec::with_capacity(boxes.len());
            for (&label, bs) in &boxes {
                let body = region::render_boxes(bs, &transform, args.header);
                written.push(region::write_label_file(&args.out, label, &body)?);
            }
            (written, summary::box_rows(&boxes, args.binning))
        }
    };

    let summary_path = args.out.join("summary.csv");
    summary::write(&rows, &summary_path)?;
    let files = written.len();
    let mut payload = provenance::Payload::new(serde_json::to_value(args)?, tag);
    payload.outputs = written;
    let prov = provenance::write_sidecar(&summary_path, payload)?;
    tracing::info!(files, shapes = rows.len(), provenance = %prov.display(), "done");
    Ok(())
}

fn synth(args: &SynthArgs, tag: Option<String>) -> Result<()> {
    tracing::info!(
        width = args.width,
        height = args.height,
        sites = args.sites,
        seed = args.seed,
        "synth"
    );
    let cfg = SynthCfg {
        width: args.width,
        height: args.height,
        sites: SiteCount::Fixed(args.sites),
        border: args.border,
        ..SynthCfg::default()
    };
    let raster = voronoi_labels(cfg, ReplayToken::new(args.seed))?;
    raster_io::save_csv(&raster, &args.out)?;
    let payload = provenance::Payload::new(serde_json::to_value(args)?, tag);
    provenance::write_sidecar(&args.out, payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "tool": "binregion",
        "version": binregion::VERSION,
        "code_rev": provenance::current_git_rev(),
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
