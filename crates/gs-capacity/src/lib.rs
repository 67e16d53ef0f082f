//! `gs-capacity` — exclusive and queued resources.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`gates`]    | `GateTable` (occupancy, size ceilings, apron limits)      |
//! | [`holds`]    | `HoldQueues` (one priority queue per hold point)          |
//! | [`runways`]  | `RunwayLocks` (one exclusive lock per runway edge)        |
//! | [`releases`] | `ReleaseQueue` (gate releases due at a future tick)       |
//! | [`manager`]  | `CapacityManager` tying the tables together               |
//! | [`error`]    | `CapacityError`, `Resource`                               |
//!
//! Acquisition never blocks.  A failed acquisition is an ordinary outcome
//! that the caller turns into waiting or a deferred spawn.

pub mod error;
pub mod gates;
pub mod holds;
pub mod manager;
pub mod releases;
pub mod runways;

#[cfg(test)]
mod tests;

pub use error::{CapacityError, CapacityResult, Resource};
pub use gates::GateTable;
pub use holds::HoldQueues;
pub use manager::CapacityManager;
pub use releases::ReleaseQueue;
pub use runways::RunwayLocks;
