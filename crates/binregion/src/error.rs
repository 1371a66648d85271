//! Error taxonomy for the boundary pipeline.
//!
//! Every per-label failure carries the offending label so callers can log and
//! skip it without losing the rest of the run.

use thiserror::Error;

use crate::raster::Label;

/// Errors raised by the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Raster or configuration rejected before any processing.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A label's edge set could not be closed into loops.
    #[error("label {label}: {remaining} edge(s) could not be chained into closed loops")]
    UnterminatedChain { label: Label, remaining: usize },

    /// A loop collapsed below three usable points (or to zero area when the
    /// caller asked for those to be dropped). Recoverable: the loop is skipped.
    #[error("label {label}: loop collapsed to {points} point(s)")]
    EmptyLoop { label: Label, points: usize },

    /// The run was cancelled between labels.
    #[error("run cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Label the failure belongs to, if it is a per-label failure.
    pub fn label(&self) -> Option<Label> {
        match *self {
            Error::UnterminatedChain { label, .. } | Error::EmptyLoop { label, .. } => Some(label),
            Error::InvalidInput { .. } | Error::Cancelled => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
