//! `TaxiModel` — the default movement model.
//!
//! # Commit phase
//!
//! Aircraft are committed one at a time in ascending id.  Each one is taken
//! out of the fleet map while it commits, so the commit code can hold it by
//! value next to `&mut` capacity and planner state, and put back afterwards.
//!
//! ```text
//! Spawned ──► Taxiing / OnRunway ──(leg end)──► next leg
//!                    │                    ├──► Waiting(HoldPoint)   hold node
//!                    │                    ├──► Waiting(HoldFull)    hold queue at its limit
//!                    │                    ├──► Waiting(RunwayLock)  runway busy
//!                    │                    ├──► Waiting(Congested)   edge full / too close
//!                    │                    └──► Waiting(Blocked)     edge closed
//!                    └──(last leg end)──► Despawned
//! ```
//!
//! Waiting aircraft retry every tick.  An aircraft is `Waiting(HoldPoint)`
//! exactly while it sits in that hold's queue; when the queue is full it waits
//! short of it as `HoldFull`.  A hold-point queue releases only its current
//! winner, and only when the winner can actually enter its next leg.
//! Among aircraft waiting at boundaries for the same runway, the runway
//! arbiter picks the one allowed to try the lock this tick.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use gs_core::{AircraftId, EdgeId, MovementType, NodeId};
use gs_fleet::{Aircraft, AircraftStatus, Fleet, WaitReason};
use gs_layout::Leg;
use gs_routing::{RerouteReason, RerouteRequest, Router};
use gs_rules::{Arbiter, Contender, Rules};

use crate::{
    FlightRecord, Intent, LegOccupancy, MovementContext, MovementModel, RunwayEvent,
    RunwayEventKind, StepState, TickObservables, compute_intents,
};

#[derive(Copy, Clone, Debug, Default)]
pub struct TaxiModel;

impl MovementModel for TaxiModel {
    fn step<R: Router>(&self, ctx: &MovementContext<'_>, state: &mut StepState<'_, R>) -> TickObservables {
        let now = ctx.now();
        let mut obs = TickObservables::new(now, ctx.clock.elapsed_secs());

        // ── Intent phase ──────────────────────────────────────────────────
        let intents = compute_intents(ctx, state.fleet);

        // ── Commit phase ──────────────────────────────────────────────────
        let runway_arbiter = Arbiter::runway(ctx.params);
        let runway_turns = runway_turns(state.fleet, &runway_arbiter, ctx);
        let mut commit = Commit {
            ctx,
            rules: ctx.rules(),
            hold_arbiter: Arbiter::hold_release(ctx.params),
            occupancy: LegOccupancy::from_fleet(state.fleet),
            runway_turns,
            state: &mut *state,
            obs: &mut obs,
        };
        for intent in intents {
            commit.aircraft(intent);
        }

        // ── Retire and observe ────────────────────────────────────────────
        for record in &obs.completed {
            state.fleet.retire(record.id);
        }
        observe(ctx, state, &mut obs);
        obs
    }
}

/// For each runway edge with aircraft waiting at a boundary for its lock,
/// the one whose turn it is.
fn runway_turns(fleet: &Fleet, arbiter: &Arbiter, ctx: &MovementContext<'_>) -> BTreeMap<EdgeId, AircraftId> {
    let mut waiting: BTreeMap<EdgeId, Vec<Contender>> = BTreeMap::new();
    for a in fleet.iter() {
        if let AircraftStatus::Waiting(WaitReason::RunwayLock(edge)) = a.status {
            waiting.entry(edge).or_default().push(a.contender());
        }
    }
    waiting
        .into_iter()
        .filter_map(|(edge, contenders)| arbiter.winner(&contenders, ctx.now()).map(|w| (edge, w.id)))
        .collect()
}

fn observe<R: Router>(ctx: &MovementContext<'_>, state: &StepState<'_, R>, obs: &mut TickObservables) {
    for a in state.fleet.iter() {
        if let Some(leg) = a.current_leg() {
            *obs.edge_occupancy.entry(leg.edge).or_default() += 1;
        }
        match a.movement {
            MovementType::Departure => obs.live_departures += 1,
            MovementType::Arrival => obs.live_arrivals += 1,
        }
    }
    obs.hold_queues = state.capacity.holds.lengths().collect();
    obs.runways_occupied = state.capacity.runways.occupied_count();
    trace!(tick = %ctx.now(), live = obs.live(), queued = obs.total_queued(), "tick observed");
}

// ── Commit ────────────────────────────────────────────────────────────────────

struct Commit<'c, 'w, R: Router> {
    ctx:          &'c MovementContext<'c>,
    rules:        Rules<'c>,
    hold_arbiter: Arbiter,
    occupancy:    LegOccupancy,
    runway_turns: BTreeMap<EdgeId, AircraftId>,
    state:        &'c mut StepState<'w, R>,
    obs:          &'c mut TickObservables,
}

impl<R: Router> Commit<'_, '_, R> {
    fn aircraft(&mut self, intent: Intent) {
        let Some(mut a) = self.state.fleet.aircraft.remove(&intent.id) else { return };
        if !a.is_terminal() {
            self.step(&mut a, intent);
            if a.status.is_waiting() {
                a.wait_ticks += 1;
            }
        }
        self.state.fleet.aircraft.insert(a.id, a);
    }

    fn step(&mut self, a: &mut Aircraft, intent: Intent) {
        let Some(leg) = a.current_leg() else {
            self.finish(a);
            return;
        };

        if a.status == AircraftStatus::Spawned {
            a.status = self.moving_status(leg);
            if a.runway_lock == Some(leg.edge) {
                self.runway_event(a.id, leg.edge, RunwayEventKind::Entered);
            }
        }

        if self.ctx.params_changed {
            self.avoid_closed_edges(a);
        }

        match a.status {
            AircraftStatus::Waiting(WaitReason::HoldPoint(hold)) => self.try_leave_hold(a, hold),
            AircraftStatus::Waiting(WaitReason::HoldFull(hold)) => self.try_join_hold(a, hold),
            AircraftStatus::Waiting(_) => self.try_continue(a),
            AircraftStatus::Taxiing | AircraftStatus::OnRunway => self.advance(a, leg, intent),
            AircraftStatus::Spawned | AircraftStatus::Despawned => {}
        }
    }

    fn moving_status(&self, leg: Leg) -> AircraftStatus {
        let on_runway = self.ctx.layout.edge(leg.edge).is_some_and(|e| e.is_runway());
        if on_runway { AircraftStatus::OnRunway } else { AircraftStatus::Taxiing }
    }

    // ── Movement along the current leg ────────────────────────────────────

    fn advance(&mut self, a: &mut Aircraft, leg: Leg, intent: Intent) {
        let dt = self.ctx.dt();
        let length = self.ctx.layout.leg_length(leg);
        let separation = self
            .ctx
            .layout
            .edge(leg.edge)
            .map_or(0.0, |e| self.rules.separation(e.kind.area(), self.ctx.env.weather));

        let mut target = a.position + intent.advance(dt);
        if let Some(leader) = self.occupancy.leader_position(leg, a.id, a.position) {
            target = target.min((leader - separation).max(a.position));
        }
        let reached_end = target >= length;
        let position = target.min(length);

        a.speed = if dt > 0.0 { (position - a.position) / dt } else { 0.0 };
        a.position = position;
        self.occupancy.update(a.id, Some(leg), Some((leg, position)));

        if reached_end {
            self.at_boundary(a, leg);
        }
    }

    fn at_boundary(&mut self, a: &mut Aircraft, leg: Leg) {
        if a.on_last_leg() {
            self.finish(a);
            return;
        }
        if self.state.capacity.holds.is_hold(leg.to) {
            self.try_join_hold(a, leg.to);
        } else {
            self.try_continue(a);
        }
    }

    // ── Boundaries ────────────────────────────────────────────────────────

    /// Join the queue at `hold`, or wait short of it while the queue is full.
    /// The queue position counts from the first tick at the boundary.
    fn try_join_hold(&mut self, a: &mut Aircraft, hold: NodeId) {
        a.speed = 0.0;
        if a.queued_at.is_none() {
            a.queued_at = Some(self.ctx.now());
        }
        match self.state.capacity.enqueue(hold, a.contender()) {
            Ok(()) => {
                a.status = AircraftStatus::Waiting(WaitReason::HoldPoint(hold));
                self.try_leave_hold(a, hold);
            }
            Err(e) => {
                let held_short = AircraftStatus::Waiting(WaitReason::HoldFull(hold));
                if a.status != held_short {
                    debug!(id = %a.id, %hold, error = %e, "hold queue full");
                }
                a.status = held_short;
            }
        }
    }

    /// Leave `hold` if this aircraft is the queue's winner and its next leg
    /// can be entered.
    fn try_leave_hold(&mut self, a: &mut Aircraft, hold: NodeId) {
        a.speed = 0.0;
        let capacity = &*self.state.capacity;
        if capacity.peek_winner(hold, &self.hold_arbiter, self.ctx.now()) != Some(a.id) {
            return;
        }
        if self.try_enter_next(a).is_ok() {
            self.state.capacity.release_hold(hold, a.id);
            debug!(id = %a.id, %hold, tick = %self.ctx.now(), "released from hold");
        }
    }

    fn try_continue(&mut self, a: &mut Aircraft) {
        if let Err(reason) = self.try_enter_next(a) {
            a.speed = 0.0;
            a.status = AircraftStatus::Waiting(reason);
            if a.queued_at.is_none() {
                a.queued_at = Some(self.ctx.now());
            }
        }
    }

    /// Move onto the next leg if it is open, has room, and (for a runway)
    /// the lock can be taken.  On failure nothing has been acquired.
    fn try_enter_next(&mut self, a: &mut Aircraft) -> Result<(), WaitReason> {
        let layout = self.ctx.layout;
        let mut rerouted = false;
        loop {
            let Some(next) = a.next_leg() else { return Ok(()) };
            if !self.rules.is_admissible(next, a.movement, a.size) {
                return Err(WaitReason::Blocked(next.edge));
            }
            let Some(edge) = layout.edge(next.edge) else {
                return Err(WaitReason::Blocked(next.edge));
            };

            // Two-way edges carry one direction at a time.
            let full = edge.capacity_hint.is_some_and(|cap| self.occupancy.edge_count(next.edge) >= cap);
            if full || self.occupancy.is_opposed(next) {
                let budget = self.ctx.params.movement.max_reroutes;
                if !rerouted && a.reroutes < budget && self.reroute(a, RerouteReason::Congestion, &[next.edge]) {
                    rerouted = true;
                    continue;
                }
                return Err(WaitReason::Congested(next.edge));
            }

            let separation = self.rules.separation(edge.kind.area(), self.ctx.env.weather);
            if self.occupancy.tail_position(next).is_some_and(|tail| tail < separation) {
                return Err(WaitReason::Congested(next.edge));
            }

            let acquire = edge.is_runway() && a.runway_lock != Some(next.edge);
            if acquire {
                let my_turn = self.runway_turns.get(&next.edge).is_none_or(|&w| w == a.id);
                if !my_turn || !self.state.capacity.try_acquire_runway(next.edge, a.id) {
                    return Err(WaitReason::RunwayLock(next.edge));
                }
            }
            self.enter(a, next, acquire);
            return Ok(());
        }
    }

    fn enter(&mut self, a: &mut Aircraft, next: Leg, acquired_runway: bool) {
        let now = self.ctx.now();
        if let Some(current) = a.current_leg() {
            if a.runway_lock == Some(current.edge) {
                self.state.capacity.release_runway(current.edge);
                a.runway_lock = None;
                self.runway_event(a.id, current.edge, RunwayEventKind::Exited);
            }
            if a.movement == MovementType::Departure && a.leg_index == 0 && !a.gate_released {
                self.state.capacity.schedule_gate_release(a.gate, now);
                a.gate_released = true;
            }
        }
        if acquired_runway {
            a.runway_lock = Some(next.edge);
            self.runway_event(a.id, next.edge, RunwayEventKind::Entered);
        }
        self.occupancy.update(a.id, a.current_leg(), Some((next, 0.0)));
        a.leg_index += 1;
        a.position = 0.0;
        a.queued_at = None;
        a.status = self.moving_status(next);
    }

    // ── Rerouting ─────────────────────────────────────────────────────────

    fn avoid_closed_edges(&mut self, a: &mut Aircraft) {
        let ahead = a.route.get(a.leg_index + 1..).unwrap_or_default();
        let closed = ahead.iter().any(|&leg| !self.rules.is_admissible(leg, a.movement, a.size));
        if closed {
            self.reroute(a, RerouteReason::EdgeClosed, &[]);
        }
    }

    /// Replace the route after the current leg.  Returns `false` if no
    /// alternative exists or the planner keeps the current route; only a
    /// changed route counts against the reroute budget.
    fn reroute(&mut self, a: &mut Aircraft, reason: RerouteReason, congested: &[EdgeId]) -> bool {
        let Some(destination) = a.destination() else { return false };
        let request = RerouteRequest {
            legs: &a.route,
            current: a.leg_index,
            destination,
            movement: a.movement,
            size: a.size,
            congested,
        };
        match self.state.planner.reroute(&self.rules, &request, reason) {
            Ok(legs) if legs == a.route => {
                trace!(id = %a.id, ?reason, "reroute kept the current route");
                false
            }
            Ok(legs) => {
                a.route = legs;
                a.reroutes += 1;
                true
            }
            Err(e) => {
                self.obs.warnings.push(format!("{}: {reason:?} reroute failed: {e}", a.id));
                false
            }
        }
    }

    // ── Completion ────────────────────────────────────────────────────────

    fn finish(&mut self, a: &mut Aircraft) {
        let now = self.ctx.now();
        if let Some(edge) = a.runway_lock.take() {
            self.state.capacity.release_runway(edge);
            self.runway_event(a.id, edge, RunwayEventKind::Exited);
        }
        match a.movement {
            MovementType::Departure => {
                if !a.gate_released {
                    self.state.capacity.schedule_gate_release(a.gate, now);
                    a.gate_released = true;
                }
            }
            MovementType::Arrival => {
                let turnaround = self.ctx.clock.ticks_for_secs(self.ctx.params.capacity.gate_turnaround_secs);
                self.state.capacity.schedule_gate_release(a.gate, now + turnaround);
            }
        }
        self.occupancy.update(a.id, a.current_leg(), None);
        a.despawn(now);

        let record = self.flight_record(a);
        debug!(
            id = %a.id,
            movement = %a.movement,
            tick = %now,
            duration_secs = record.duration_secs,
            "despawned"
        );
        self.obs.completed.push(record);
    }

    fn flight_record(&self, a: &Aircraft) -> FlightRecord {
        let dt = self.ctx.dt();
        let completion_tick = a.completion_tick.unwrap_or(self.ctx.now());
        let flown = a.route.get(..=a.leg_index).unwrap_or(&a.route[..]);
        FlightRecord {
            id: a.id,
            movement: a.movement,
            size: a.size,
            gate: a.gate,
            spawn_tick: a.spawn_tick,
            completion_tick,
            // The completion tick itself is spent moving.
            duration_secs: (completion_tick.since(a.spawn_tick) + 1) as f64 * dt,
            wait_secs: a.wait_ticks as f64 * dt,
            distance: flown.iter().map(|&leg| self.ctx.layout.leg_length(leg)).sum(),
            reroutes: a.reroutes,
        }
    }

    fn runway_event(&mut self, aircraft: AircraftId, edge: EdgeId, kind: RunwayEventKind) {
        trace!(%aircraft, %edge, ?kind, "runway event");
        self.obs.runway_events.push(RunwayEvent { tick: self.ctx.now(), aircraft, edge, kind });
    }
}
