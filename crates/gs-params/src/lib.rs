//! `gs-params` — the run's configuration as immutable, versioned snapshots.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`value`]      | `NumericParam`, `WeatherParam`, the `Sample` trait          |
//! | [`categories`] | One struct per category plus `PriorityMode`, `TrafficMode`  |
//! | [`snapshot`]   | `Parameters`, `Environment`                                 |
//! | [`document`]   | flat-key document parser with clamping                      |
//! | [`error`]      | `ParamsError`, `ParamsResult<T>`                            |
//!
//! A snapshot is never mutated after construction; a mid-run change builds a
//! new one with [`Parameters::updated`] and the runner swaps it in between ticks.

pub mod categories;
pub mod document;
pub mod error;
pub mod snapshot;
pub mod value;

#[cfg(test)]
mod tests;

pub use categories::{
    AccessParams, CapacityParams, EnvironmentParams, MovementParams, PerArea, PerSize, PerWeather,
    PriorityMode, PriorityParams, PriorityWeights, RunControl, SeparationParams, SizeMix,
    TrafficMode, TrafficParams,
};
pub use error::{ParamsError, ParamsResult};
pub use snapshot::{Environment, Parameters};
pub use value::{NumericParam, Sample, WeatherParam};
