//! Pipeline configuration and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::raster::Label;
use crate::simplify::DEFAULT_TOLERANCE;

/// Which labels are background and therefore not traced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Background {
    /// Every negative label.
    #[default]
    Negative,
    /// Exactly this label.
    Label(Label),
    /// Trace every label.
    None,
}

impl Background {
    #[inline]
    pub fn is_background(&self, label: Label) -> bool {
        match *self {
            Background::Negative => label < 0,
            Background::Label(v) => label == v,
            Background::None => false,
        }
    }
}

/// What to do with loops whose simplified area is exactly zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroAreaPolicy {
    /// Emit them; the sign rule classifies them as exclusions.
    #[default]
    Keep,
    /// Drop them like loops that collapsed below three points.
    Drop,
}

/// Pipeline configuration.
#[derive(Clone, Copy, Debug)]
pub struct PipelineCfg {
    /// RDP tolerance in raster units.
    pub tolerance: f64,
    pub background: Background,
    pub zero_area: ZeroAreaPolicy,
    /// Worker threads; 0 uses the available parallelism.
    pub threads: usize,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            background: Background::default(),
            zero_area: ZeroAreaPolicy::default(),
            threads: 0,
        }
    }
}

impl PipelineCfg {
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::invalid(format!(
                "tolerance must be finite and >= 0 (got {})",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Worker count actually used for `jobs` labels.
    pub(crate) fn worker_count(&self, jobs: usize) -> usize {
        let wanted = if self.threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.threads
        };
        wanted.min(jobs).max(1)
    }
}

/// Shared flag checked between labels.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
