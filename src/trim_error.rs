//! TrimError: unified error type for talus-trim public APIs
//!
//! Recoverable, per-entity problems (a talus line without a partner, a
//! degenerate line, a failed trim task) are collected into the run summary and
//! the run continues. Everything else aborts the run: a mask that cannot be
//! built, bad configuration, duplicate identifiers at the input boundary, or
//! I/O failures.

use thiserror::Error;

use crate::ids::{CourbeId, EntityRef, TalusId};
use crate::talus::TalusSide;

/// Unified error type for talus-trim operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrimError {
    /// A talus line found no unclaimed partner within the pairing distance.
    #[error("pairing deficit: {side} talus #{id} has no eligible partner within {max_distance}")]
    PairingDeficit {
        id: TalusId,
        side: TalusSide,
        max_distance: f64,
    },
    /// A line or ring has too few distinct points (or non-finite coordinates).
    #[error("degenerate geometry in {entity}: {reason}")]
    DegenerateGeometry { entity: EntityRef, reason: String },
    /// The shared trimming mask could not be formed.
    #[error("mask construction failed at {entity}: {reason}")]
    MaskConstruction { entity: EntityRef, reason: String },
    /// A single trim task failed; only that courbe's contribution is lost.
    #[error("trim task failed for courbe #{id}: {reason}")]
    TaskFailure { id: CourbeId, reason: String },
    /// Two input records of the same kind share an identifier.
    #[error("duplicate identifier: {0}")]
    DuplicateId(EntityRef),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The worker pool could not be created.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),
    /// Input or output could not be (de)serialized.
    #[error("format error: {0}")]
    Format(String),
}

impl TrimError {
    /// `true` for errors that abort the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TrimError::PairingDeficit { .. }
                | TrimError::DegenerateGeometry { .. }
                | TrimError::TaskFailure { .. }
        )
    }

    /// The entity the error is attached to, when there is one.
    pub fn entity(&self) -> Option<EntityRef> {
        match self {
            TrimError::PairingDeficit { id, .. } => Some(EntityRef::Talus(*id)),
            TrimError::DegenerateGeometry { entity, .. }
            | TrimError::MaskConstruction { entity, .. } => Some(*entity),
            TrimError::TaskFailure { id, .. } => Some(EntityRef::Courbe(*id)),
            TrimError::DuplicateId(entity) => Some(*entity),
            TrimError::InvalidConfig(_)
            | TrimError::WorkerPool(_)
            | TrimError::Io(_)
            | TrimError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for TrimError {
    fn from(err: std::io::Error) -> Self {
        TrimError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrimError {
    fn from(err: serde_json::Error) -> Self {
        TrimError::Format(err.to_string())
    }
}
