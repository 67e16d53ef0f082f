//! `gs-sim` — tick loop orchestrator for groundsim.
//!
//! # Tick order
//!
//! ```text
//! while tick × dt < run.duration:
//!   ① Environment — sample weather, wind and traffic rates from the snapshot
//!   ② Spawner     — departures per gate, then one arrival draw
//!   ③ Housekeeping — release gates whose turnaround has elapsed
//!   ④ Movement    — intent phase (parallel with `parallel`), then commits
//!                   in ascending aircraft id
//!   ⑤ Metrics     — record the tick's observables
//! ```
//!
//! A new parameter snapshot may replace the current one only between ticks,
//! via [`Sim::replace_parameters`] or a [`ParameterSchedule`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the movement intent phase on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gs_sim::{NoopObserver, SimBuilder};
//!
//! let layout = Layout::from_json(&layout_json)?;
//! let params = Parameters::from_json(&params_json)?;
//! let mut sim = SimBuilder::new(layout, params).build()?;
//! let results = sim.run(&mut NoopObserver);
//! println!("{}", results.to_json()?);
//! ```

pub mod builder;
pub mod entry;
pub mod error;
pub mod observer;
pub mod schedule;
pub mod sim;


pub use builder::SimBuilder;
pub use entry::{init_run, run_documents, run_to_completion};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use schedule::{ParameterSchedule, ParameterUpdate};
pub use sim::{ENVIRONMENT_STREAM, Sim};
