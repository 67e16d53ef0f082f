//! `gs-core` — foundational types for the `groundsim` airport surface simulator.
//!
//! This crate is a dependency of every other `gs-*` crate.  It has no `gs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AircraftId`, `NodeId`, `EdgeId`                          |
//! | [`geo`]         | `Point2`, planar distance and compass bearings            |
//! | [`time`]        | `Tick`, `SimClock`                                        |
//! | [`rng`]         | `AircraftRng` (per-aircraft), `SimRng` (run-level)        |
//! | [`kinds`]       | `SizeClass`, `MovementType`, `Weather`, `Area`            |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod kinds;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Point2, heading_difference, polyline_length};
pub use ids::{AircraftId, EdgeId, NodeId};
pub use kinds::{Area, MovementType, SizeClass, Weather};
pub use rng::{AircraftRng, SimRng};
pub use time::{SimClock, Tick};
