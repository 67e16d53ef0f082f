use thiserror::Error;

use gs_capacity::CapacityError;
use gs_core::EdgeId;
use gs_routing::RoutingError;

/// Reason a spawn attempt was abandoned for this tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("live aircraft limit of {0} reached")]
    LiveLimit(u32),

    #[error("no runway end is usable in the current wind")]
    NoActiveRunway,

    #[error("size mix has no positive weight")]
    EmptyMix,

    #[error("gate unavailable: {0}")]
    Gate(#[from] CapacityError),

    #[error("routing failed: {0}")]
    Route(#[from] RoutingError),

    #[error("route has no legs")]
    EmptyRoute,

    #[error("runway {0} is occupied")]
    RunwayBusy(EdgeId),
}

pub type SpawnResult<T> = Result<T, SpawnError>;
