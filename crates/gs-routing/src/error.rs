//! Routing error type.

use thiserror::Error;

use gs_core::NodeId;

/// Routing failures are non-fatal: the caller defers the spawn or keeps the
/// aircraft waiting and tries again later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("no admissible path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in layout")]
    NodeNotFound(NodeId),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
