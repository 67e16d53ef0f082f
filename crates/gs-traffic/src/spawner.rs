//! Per-tick stochastic spawning.
//!
//! # Draws
//!
//! Departures: one Bernoulli draw per gate (ascending node id) with
//!
//! ```text
//! p = departure_rate / 3600 × dt / gate_count
//! ```
//!
//! so the airport-wide expectation matches the configured hourly rate.
//! Arrivals: a single draw with `p = arrival_rate / 3600 × dt` at the active
//! arrival runway end.  A successful draw is followed by a size-class draw
//! from the matching mix.  All draws come from the spawner's own `SimRng`
//! stream, in that order, so the sequence depends only on the seed and on
//! the draw outcomes.
//!
//! # Acquisition order
//!
//! gate → route → runway lock (only when the first leg is a runway).  A
//! failure at any step rolls back the earlier steps.  The aircraft id is
//! previewed with [`Fleet::peek_next_id`] while acquiring and consumed only
//! when the aircraft is admitted.

use tracing::{debug, warn};

use gs_capacity::CapacityManager;
use gs_core::{AircraftId, MovementType, NodeId, SimRng, SizeClass, Tick};
use gs_fleet::{Aircraft, AircraftStatus, Fleet};
use gs_layout::Layout;
use gs_params::{Environment, Parameters};
use gs_routing::{RoutePlanner, Router, active_runway_end};
use gs_rules::Rules;

use crate::{SpawnError, SpawnResult};

/// Seed offset of the spawner's RNG stream.
pub const SPAWN_STREAM: u64 = 2;

/// Read-only inputs of one spawn pass.
#[derive(Copy, Clone)]
pub struct SpawnContext<'a> {
    pub layout: &'a Layout,
    pub params: &'a Parameters,
    pub env:    &'a Environment,
    pub now:    Tick,
}

impl<'a> SpawnContext<'a> {
    pub fn new(layout: &'a Layout, params: &'a Parameters, env: &'a Environment, now: Tick) -> Self {
        Self { layout, params, env, now }
    }

    #[inline]
    fn rules(&self) -> Rules<'a> {
        Rules::new(self.layout, self.params)
    }

    fn active_end(&self, movement: MovementType) -> Option<NodeId> {
        active_runway_end(
            self.layout,
            self.env.wind_direction_deg,
            self.params.environment.runway_heading_tolerance,
            movement,
        )
    }
}

/// What one spawn pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Aircraft admitted this tick, ascending id.
    pub spawned:          Vec<AircraftId>,
    /// Successful draws that could not be turned into an aircraft.
    pub deferred:         u32,
    /// Deferrals caused by a routing failure (a subset of `deferred`).
    pub routing_failures: u32,
}

impl SpawnReport {
    fn record(&mut self, outcome: SpawnResult<AircraftId>) {
        match outcome {
            Ok(id) => self.spawned.push(id),
            Err(e) => {
                self.deferred += 1;
                if matches!(e, SpawnError::Route(_)) {
                    self.routing_failures += 1;
                }
            }
        }
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

pub struct Spawner {
    rng: SimRng,
}

impl Spawner {
    pub fn new(run_seed: u64) -> Self {
        Self { rng: SimRng::stream(run_seed, SPAWN_STREAM) }
    }

    /// Run the departure draws, then the arrival draw, for tick `ctx.now`.
    pub fn spawn_tick<R: Router>(
        &mut self,
        ctx: &SpawnContext<'_>,
        fleet: &mut Fleet,
        capacity: &mut CapacityManager,
        planner: &mut RoutePlanner<R>,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();
        let dt = ctx.params.run.time_step_secs;

        let gates: Vec<NodeId> = ctx.layout.gates().map(|n| n.id).collect();
        if !gates.is_empty() && ctx.env.departure_rate_per_hour > 0.0 {
            let p = ctx.env.departure_rate_per_hour / 3600.0 * dt / gates.len() as f64;
            for gate in gates {
                if !self.rng.gen_bool(p) {
                    continue;
                }
                let outcome = self
                    .draw_size(&ctx.params.traffic.departure_mix)
                    .and_then(|size| spawn_departure(ctx, fleet, capacity, planner, gate, size));
                log_outcome(MovementType::Departure, ctx.now, &outcome);
                report.record(outcome);
            }
        }

        if ctx.env.arrival_rate_per_hour > 0.0 {
            let p = ctx.env.arrival_rate_per_hour / 3600.0 * dt;
            if self.rng.gen_bool(p) {
                let outcome = self
                    .draw_size(&ctx.params.traffic.arrival_mix)
                    .and_then(|size| spawn_arrival(ctx, fleet, capacity, planner, size));
                log_outcome(MovementType::Arrival, ctx.now, &outcome);
                report.record(outcome);
            }
        }

        report
    }

    fn draw_size(&mut self, mix: &gs_params::SizeMix) -> SpawnResult<SizeClass> {
        mix.sample(&mut self.rng).ok_or(SpawnError::EmptyMix)
    }
}

fn log_outcome(movement: MovementType, now: Tick, outcome: &SpawnResult<AircraftId>) {
    match outcome {
        Ok(id) => debug!(%id, %movement, tick = %now, "spawned"),
        Err(e @ SpawnError::Route(_)) => warn!(%movement, tick = %now, error = %e, "spawn deferred"),
        Err(e) => debug!(%movement, tick = %now, error = %e, "spawn deferred"),
    }
}

// ── Single spawns ─────────────────────────────────────────────────────────────

/// Spawn a departure at `gate` bound for the active departure runway end.
pub fn spawn_departure<R: Router>(
    ctx: &SpawnContext<'_>,
    fleet: &mut Fleet,
    capacity: &mut CapacityManager,
    planner: &mut RoutePlanner<R>,
    gate: NodeId,
    size: SizeClass,
) -> SpawnResult<AircraftId> {
    check_live_limit(ctx, fleet)?;
    let end = ctx.active_end(MovementType::Departure).ok_or(SpawnError::NoActiveRunway)?;
    let id = fleet.peek_next_id();

    capacity.acquire_specific_gate(gate, size, id)?;
    match admit_on_route(ctx, fleet, capacity, planner, gate, end, gate, size, MovementType::Departure) {
        Ok(id) => Ok(id),
        Err(e) => {
            capacity.release_gate(gate);
            Err(e)
        }
    }
}

/// Spawn an arrival at the active arrival runway end, bound for any free gate
/// that fits it.
pub fn spawn_arrival<R: Router>(
    ctx: &SpawnContext<'_>,
    fleet: &mut Fleet,
    capacity: &mut CapacityManager,
    planner: &mut RoutePlanner<R>,
    size: SizeClass,
) -> SpawnResult<AircraftId> {
    check_live_limit(ctx, fleet)?;
    let end = ctx.active_end(MovementType::Arrival).ok_or(SpawnError::NoActiveRunway)?;
    let id = fleet.peek_next_id();

    let preference = ctx.params.traffic.apron_preference.as_deref();
    let gate = capacity.acquire_gate(size, preference, id)?;
    match admit_on_route(ctx, fleet, capacity, planner, end, gate, gate, size, MovementType::Arrival) {
        Ok(id) => Ok(id),
        Err(e) => {
            capacity.release_gate(gate);
            Err(e)
        }
    }
}

fn check_live_limit(ctx: &SpawnContext<'_>, fleet: &Fleet) -> SpawnResult<()> {
    let limit = ctx.params.traffic.max_live_aircraft;
    if fleet.live_count() >= limit as usize {
        return Err(SpawnError::LiveLimit(limit));
    }
    Ok(())
}

/// Route, take the runway lock if needed, and admit.  Leaves the gate to the
/// caller on failure.
#[allow(clippy::too_many_arguments)]
fn admit_on_route<R: Router>(
    ctx: &SpawnContext<'_>,
    fleet: &mut Fleet,
    capacity: &mut CapacityManager,
    planner: &mut RoutePlanner<R>,
    origin: NodeId,
    destination: NodeId,
    gate: NodeId,
    size: SizeClass,
    movement: MovementType,
) -> SpawnResult<AircraftId> {
    let route = planner.route(&ctx.rules(), origin, destination, movement, size)?;
    let first = route.legs.first().copied().ok_or(SpawnError::EmptyRoute)?;

    let id = fleet.peek_next_id();
    let on_runway = capacity.runways.is_runway(first.edge);
    if on_runway && !capacity.try_acquire_runway(first.edge, id) {
        return Err(SpawnError::RunwayBusy(first.edge));
    }

    let mut aircraft = Aircraft::new(id, size, movement, route.legs, gate, ctx.now);
    if on_runway {
        aircraft.runway_lock = Some(first.edge);
    }
    debug_assert_eq!(aircraft.status, AircraftStatus::Spawned);
    Ok(fleet.admit(aircraft))
}
