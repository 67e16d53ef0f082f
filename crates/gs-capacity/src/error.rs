//! Capacity errors.  Both kinds are non-fatal backpressure signals.

use std::fmt;

use thiserror::Error;

use gs_core::{EdgeId, NodeId, SizeClass};

/// The resource an acquisition was aimed at.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resource {
    Gate(NodeId),
    /// Any gate able to take this size class.
    AnyGate(SizeClass),
    Hold(NodeId),
    Runway(EdgeId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Gate(n) => write!(f, "gate {n}"),
            Resource::AnyGate(size) => write!(f, "any gate for {size} aircraft"),
            Resource::Hold(n) => write!(f, "hold queue at {n}"),
            Resource::Runway(e) => write!(f, "runway {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// The resource exists and would fit, but is busy right now.
    #[error("{resource} is busy")]
    AcquisitionFailure { resource: Resource },

    /// No admissible slot exists at all (wrong size, queue limit reached).
    #[error("no capacity for {resource}")]
    CapacityExhausted { resource: Resource },

    #[error("{0} is not a managed resource")]
    Unknown(Resource),
}

pub type CapacityResult<T> = Result<T, CapacityError>;
