//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use tracing::info;

use gs_capacity::CapacityManager;
use gs_core::{SimClock, SimRng, Tick};
use gs_fleet::Fleet;
use gs_layout::Layout;
use gs_metrics::MetricsCollector;
use gs_movement::{MovementModel, TaxiModel};
use gs_params::{Environment, Parameters};
use gs_routing::{DijkstraRouter, RoutePlanner, Router};
use gs_traffic::Spawner;

use crate::sim::ENVIRONMENT_STREAM;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M, R>`].
///
/// # Required inputs
///
/// - [`Layout`] — an already validated airport graph
/// - [`Parameters`] — the initial snapshot (version 0)
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default          |
/// |-----------------|------------------|
/// | `.movement(m)`  | [`TaxiModel`]    |
/// | `.router(r)`    | [`DijkstraRouter`] |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(layout, params)
///     .movement(TaxiModel)
///     .router(DijkstraRouter)
///     .build()?;
/// let results = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<M: MovementModel = TaxiModel, R: Router = DijkstraRouter> {
    layout:   Layout,
    params:   Parameters,
    movement: M,
    router:   R,
}

impl SimBuilder {
    /// Create a builder with the default movement model and router.
    pub fn new(layout: Layout, params: Parameters) -> Self {
        Self { layout, params, movement: TaxiModel, router: DijkstraRouter }
    }
}

impl<M: MovementModel, R: Router> SimBuilder<M, R> {
    /// Swap in a different movement model.
    pub fn movement<M2: MovementModel>(self, movement: M2) -> SimBuilder<M2, R> {
        SimBuilder { layout: self.layout, params: self.params, movement, router: self.router }
    }

    /// Swap in a different router.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<M, R2> {
        SimBuilder { layout: self.layout, params: self.params, movement: self.movement, router }
    }

    /// Validate inputs, seed the RNG streams, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M, R>> {
        let params = self.params;
        params.validate()?;
        let run = &params.run;
        if !(run.time_step_secs > 0.0) {
            return Err(SimError::Config(format!(
                "run.time_step must be positive, got {}",
                run.time_step_secs
            )));
        }
        if self.layout.is_empty() {
            return Err(SimError::Config("layout has no nodes".into()));
        }

        let clock = SimClock::new(run.time_step_secs);
        let end_tick = Tick(params.total_ticks());
        info!(
            layout = self.layout.name.as_deref().unwrap_or("unnamed"),
            nodes = self.layout.node_count(),
            edges = self.layout.edge_count(),
            seed = run.seed,
            ticks = end_tick.0,
            "simulation initialised"
        );

        Ok(Sim {
            capacity:       CapacityManager::from_layout(&self.layout, &params),
            metrics:        MetricsCollector::new(&self.layout, run),
            fleet:          Fleet::new(run.seed),
            spawner:        Spawner::new(run.seed),
            env_rng:        SimRng::stream(run.seed, ENVIRONMENT_STREAM),
            planner:        RoutePlanner::new(self.router),
            env:            Environment::default(),
            model:          self.movement,
            layout:         self.layout,
            params:         Arc::new(params),
            clock,
            params_changed: false,
            end_tick,
        })
    }
}
