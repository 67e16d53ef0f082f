//! `gs-traffic` — the spawner.
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`spawner`] | `Spawner`, `SpawnContext`, `SpawnReport`, single spawns    |
//! | [`error`]   | `SpawnError` (why an attempt was deferred)                 |
//!
//! Spawning never fails a tick.  An attempt that cannot get its gate, its
//! route or its runway lock gives back whatever it took and is counted as
//! deferred.

pub mod error;
pub mod spawner;


pub use error::{SpawnError, SpawnResult};
pub use spawner::{SpawnContext, SpawnReport, Spawner, spawn_arrival, spawn_departure};
