//! Reproducible synthetic label rasters (random Voronoi partitions).
//!
//! Purpose
//! - Realistic segmentation-like inputs for benches, property tests and demos:
//!   irregular regions, holes where a small cell is enclosed by a larger one,
//!   and an optional background frame.
//!
//! Model
//! - Draw `k` sites uniformly in the raster; each pixel takes the label of its
//!   nearest site (ties go to the lower index). Pixels within `border` of the
//!   edge are set to `background`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::raster::{Label, Raster};

/// Site count distribution.
#[derive(Clone, Copy, Debug)]
pub enum SiteCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl SiteCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            SiteCount::Fixed(n) => n.max(1),
            SiteCount::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Generator configuration.
#[derive(Clone, Copy, Debug)]
pub struct SynthCfg {
    pub width: usize,
    pub height: usize,
    pub sites: SiteCount,
    /// Width of the background frame in pixels (0 = none).
    pub border: usize,
    pub background: Label,
}

impl Default for SynthCfg {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            sites: SiteCount::Fixed(12),
            border: 1,
            background: -1,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a Voronoi label raster. Labels are `0..k` in site order.
pub fn voronoi_labels(cfg: SynthCfg, tok: ReplayToken) -> Result<Raster> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(Error::invalid(format!(
            "synthetic raster must be non-empty (got {}x{})",
            cfg.width, cfg.height
        )));
    }
    let mut rng = tok.to_std_rng();
    let k = cfg.sites.sample(&mut rng);
    let sites: Vec<Vector2<f64>> = (0..k)
        .map(|_| {
            Vector2::new(
                rng.gen::<f64>() * cfg.width as f64,
                rng.gen::<f64>() * cfg.height as f64,
            )
        })
        .collect();

    let mut raster = Raster::filled(cfg.width, cfg.height, cfg.background)?;
    for y in 0..cfg.height {
        for x in 0..cfg.width {
            let in_frame = x < cfg.border
                || y < cfg.border
                || x + cfg.border >= cfg.width
                || y + cfg.border >= cfg.height;
            if in_frame {
                continue;
            }
            let c = Vector2::new(x as f64 + 0.5, y as f64 + 0.5);
            let mut best = (0usize, f64::INFINITY);
            for (i, s) in sites.iter().enumerate() {
                let d = (s - c).norm_squared();
                if d < best.1 {
                    best = (i, d);
                }
            }
            raster.set(x, y, best.0 as Label);
        }
    }
    Ok(raster)
}
