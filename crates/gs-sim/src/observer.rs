//! Simulation observer trait for progress reporting.

use gs_core::Tick;
use gs_metrics::ResultsDocument;
use gs_movement::TickObservables;
use gs_params::Parameters;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, obs: &TickObservables) {
///         if obs.tick.0 % self.interval == 0 {
///             println!("{}: {} aircraft on ground", obs.tick, obs.live());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the environment is sampled.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after metrics have recorded the tick.
    fn on_tick_end(&mut self, _obs: &TickObservables) {}

    /// Called when a new snapshot takes effect, before tick `_tick` runs.
    fn on_parameters_replaced(&mut self, _tick: Tick, _params: &Parameters) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _results: &ResultsDocument) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
