//! `gs-movement` — the model core: one tick of aircraft movement.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`model`]       | `MovementModel` trait, `MovementContext`, `StepState`   |
//! | [`intent`]      | `Intent` and the (optionally parallel) intent phase     |
//! | [`occupancy`]   | `LegOccupancy`: who is where on which leg               |
//! | [`taxi`]        | `TaxiModel`, the default commit phase                   |
//! | [`observables`] | `TickObservables`, `RunwayEvent`, `FlightRecord`        |
//!
//! # Two phases
//!
//! The intent phase reads the world and each aircraft's own RNG and produces
//! one [`Intent`] per live aircraft.  It never touches shared mutable state,
//! so with the `parallel` feature it runs on Rayon.  The commit phase then
//! applies intents one aircraft at a time in ascending id, which is the only
//! place capacity is acquired or released.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                         |
//! |------------|------------------------------------------------|
//! | `parallel` | Intent phase runs on Rayon's thread pool.      |

pub mod intent;
pub mod model;
pub mod observables;
pub mod occupancy;
pub mod taxi;


pub use intent::{Intent, compute_intents};
pub use model::{MovementContext, MovementModel, StepState};
pub use observables::{FlightRecord, RunwayEvent, RunwayEventKind, TickObservables};
pub use occupancy::LegOccupancy;
pub use taxi::TaxiModel;
