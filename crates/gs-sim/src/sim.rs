//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use gs_capacity::CapacityManager;
use gs_core::{SimClock, SimRng, Tick};
use gs_fleet::Fleet;
use gs_layout::Layout;
use gs_metrics::{MetricsCollector, ResultsDocument};
use gs_movement::{MovementContext, MovementModel, StepState, TickObservables};
use gs_params::{Environment, Parameters};
use gs_routing::{RoutePlanner, Router};
use gs_traffic::{SpawnContext, Spawner};

use crate::{ParameterSchedule, ParameterUpdate, SimObserver, SimResult};

/// Seed offset of the environment sampler's RNG stream.
pub const ENVIRONMENT_STREAM: u64 = 1;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<M, R>` owns the whole world state and drives the five-step tick:
///
/// 1. **Environment**: resolve the snapshot's stochastic parameters.
/// 2. **Spawner**: admit new departures and arrivals; failures defer.
/// 3. **Housekeeping**: process due gate releases.
/// 4. **Movement**: [`MovementModel::step`] advances every live aircraft.
/// 5. **Metrics**: [`MetricsCollector::record`] accumulates the observables.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`init_run`][crate::init_run].
pub struct Sim<M: MovementModel, R: Router> {
    pub layout: Layout,

    /// Current snapshot.  Replaced wholesale between ticks, never mutated.
    pub params: Arc<Parameters>,

    pub clock: SimClock,

    /// The environment sampled for the most recent tick.
    pub env: Environment,

    pub fleet: Fleet,

    pub capacity: CapacityManager,

    pub planner: RoutePlanner<R>,

    pub spawner: Spawner,

    pub metrics: MetricsCollector,

    pub model: M,

    pub(crate) env_rng: SimRng,

    /// Set by a snapshot replacement, cleared after the next model step.
    pub(crate) params_changed: bool,

    /// Tick at which the run is finished (`ceil(duration / dt)`).
    pub(crate) end_tick: Tick,
}

impl<M: MovementModel, R: Router> Sim<M, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// `true` once `tick × dt ≥ run.duration`.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.end_tick
    }

    #[inline]
    pub fn end_tick(&self) -> Tick {
        self.end_tick
    }

    /// Run from the current tick to the end and return the results document.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> ResultsDocument {
        while !self.is_finished() {
            observer.on_tick_start(self.clock.current_tick);
            let obs = self.advance();
            observer.on_tick_end(&obs);
        }
        self.finish(observer)
    }

    /// Like [`run`](Self::run), applying each scheduled update at the
    /// boundary before its tick.
    ///
    /// Fails only if a scheduled update does not validate; the run stops at
    /// that boundary.
    pub fn run_with_schedule<O: SimObserver>(
        &mut self,
        observer: &mut O,
        mut schedule: ParameterSchedule,
    ) -> SimResult<ResultsDocument> {
        while !self.is_finished() {
            let now = self.clock.current_tick;
            for update in schedule.drain_due(now) {
                match update {
                    ParameterUpdate::Snapshot(params) => self.replace_parameters(params)?,
                    ParameterUpdate::Document(doc) => self.update_parameters(&doc)?,
                }
                observer.on_parameters_replaced(now, &self.params);
            }
            observer.on_tick_start(now);
            let obs = self.advance();
            observer.on_tick_end(&obs);
        }
        if !schedule.is_empty() {
            debug!(pending = schedule.len(), "run ended with parameter updates still scheduled");
        }
        Ok(self.finish(observer))
    }

    /// Results so far, as if the run ended now.
    pub fn results(&self) -> ResultsDocument {
        self.metrics.summarize(self.params.run.duration_secs)
    }

    /// Replace the parameter snapshot.  Takes effect from the next tick.
    ///
    /// The new snapshot's version is set to the current version + 1.  Run
    /// control (time step, duration, seed, throughput window) is fixed for
    /// the whole run; changes to it are ignored with a warning.
    pub fn replace_parameters(&mut self, mut next: Parameters) -> SimResult<()> {
        next.validate()?;
        next.version = self.params.version + 1;
        if next.run != self.params.run {
            warn!(version = next.version, "run control cannot change mid-run; keeping the current values");
            next.run = self.params.run.clone();
        }

        self.planner.refresh(&self.params, &next);
        self.capacity.apply_parameters(&next);
        self.params_changed = true;
        info!(
            version = next.version,
            tick = self.clock.current_tick.0,
            closed_edges = next.access.closed_edges.len(),
            "parameter snapshot replaced"
        );
        self.params = Arc::new(next);
        Ok(())
    }

    /// Apply a parameter document on top of the current snapshot.
    pub fn update_parameters(&mut self, doc: &Value) -> SimResult<()> {
        let next = self.params.updated(doc)?;
        self.replace_parameters(next)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Run exactly one tick and return what it produced.
    pub fn advance(&mut self) -> TickObservables {
        let now = self.clock.current_tick;

        // ── ① Environment ─────────────────────────────────────────────────
        self.env = self.params.sample_environment(&mut self.env_rng);

        // ── ② Spawner ─────────────────────────────────────────────────────
        let report = {
            let ctx = SpawnContext::new(&self.layout, &self.params, &self.env, now);
            self.spawner.spawn_tick(&ctx, &mut self.fleet, &mut self.capacity, &mut self.planner)
        };

        // ── ③ Capacity housekeeping ───────────────────────────────────────
        self.capacity.housekeeping(now);

        // ── ④ Model step ──────────────────────────────────────────────────
        let ctx = MovementContext {
            layout:         &self.layout,
            params:         &self.params,
            env:            &self.env,
            clock:          &self.clock,
            params_changed: self.params_changed,
        };
        let mut state = StepState {
            fleet:    &mut self.fleet,
            capacity: &mut self.capacity,
            planner:  &mut self.planner,
        };
        let mut obs = self.model.step(&ctx, &mut state);
        obs.spawned = report.spawned.len() as u32;
        obs.deferred_spawns = report.deferred;
        obs.routing_failures = report.routing_failures;

        // ── ⑤ Metrics ─────────────────────────────────────────────────────
        self.metrics.record(&obs);

        self.params_changed = false;
        self.clock.advance();
        obs
    }

    fn finish<O: SimObserver>(&mut self, observer: &mut O) -> ResultsDocument {
        let results = self.results();
        info!(
            ticks = self.clock.current_tick.0,
            flights = results.summary.total_flights,
            spawned = results.summary.total_spawned,
            live = self.fleet.live_count(),
            "run complete"
        );
        observer.on_sim_end(self.clock.current_tick, &results);
        results
    }
}
