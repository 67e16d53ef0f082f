//! `gs-fleet` — aircraft and the store that owns them.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`aircraft`] | `Aircraft`, `AircraftStatus`, `WaitReason`             |
//! | [`fleet`]    | `Fleet` (live + completed), `AircraftRngs`             |
//!
//! Other components refer to aircraft by `AircraftId` only; the fleet is the
//! single owner.

pub mod aircraft;
pub mod fleet;


pub use aircraft::{Aircraft, AircraftStatus, WaitReason};
pub use fleet::{AircraftRngs, Fleet};
