//! Spatial-subsystem error type.

use thiserror::Error;

use wisp_core::NodeId;

/// Errors produced by `wisp-spatial`.
///
/// `NoRoute` is the detectable form of the unreachable-end-node condition:
/// the search exhausts the reachable component without selecting the end
/// node.  Callers treat it as recoverable (the engine falls back to a direct
/// hop) — it must never surface to the user of a decorative subsystem.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
