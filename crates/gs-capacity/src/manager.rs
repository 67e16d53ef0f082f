//! `CapacityManager`: the single owner of gate, hold and runway state.

use tracing::debug;

use gs_core::{AircraftId, EdgeId, NodeId, SizeClass, Tick};
use gs_layout::Layout;
use gs_params::Parameters;
use gs_rules::{Arbiter, Contender};

use crate::{CapacityResult, GateTable, HoldQueues, ReleaseQueue, RunwayLocks};

#[derive(Clone, Debug, Default)]
pub struct CapacityManager {
    pub gates:    GateTable,
    pub holds:    HoldQueues,
    pub runways:  RunwayLocks,
    pub releases: ReleaseQueue,
}

impl CapacityManager {
    pub fn from_layout(layout: &Layout, params: &Parameters) -> Self {
        Self {
            gates: GateTable::from_layout(layout, params),
            holds: HoldQueues::from_layout(layout, params.capacity.hold_queue_limit),
            runways: RunwayLocks::from_layout(layout),
            releases: ReleaseQueue::new(),
        }
    }

    /// Pick up limit changes from a new snapshot.  Current occupants and
    /// queue entries are kept even if they now exceed a lowered limit.
    pub fn apply_parameters(&mut self, params: &Parameters) {
        self.gates.apply_parameters(params);
        self.holds.set_limit(params.capacity.hold_queue_limit);
    }

    // ── Gates ─────────────────────────────────────────────────────────────

    pub fn acquire_gate(
        &mut self,
        size: SizeClass,
        preference: Option<&str>,
        aircraft: AircraftId,
    ) -> CapacityResult<NodeId> {
        self.gates.acquire(size, preference, aircraft)
    }

    pub fn acquire_specific_gate(
        &mut self,
        gate: NodeId,
        size: SizeClass,
        aircraft: AircraftId,
    ) -> CapacityResult<()> {
        self.gates.acquire_specific(gate, size, aircraft)
    }

    pub fn release_gate(&mut self, gate: NodeId) -> Option<AircraftId> {
        self.gates.release(gate)
    }

    pub fn schedule_gate_release(&mut self, gate: NodeId, due: Tick) {
        self.releases.push(due, gate);
    }

    /// Apply every queued release due at or before `now`.
    pub fn housekeeping(&mut self, now: Tick) -> Vec<NodeId> {
        let due = self.releases.drain_due(now);
        for &gate in &due {
            let previous = self.gates.release(gate);
            debug!(%gate, ?previous, tick = %now, "gate released");
        }
        due
    }

    // ── Holds ─────────────────────────────────────────────────────────────

    pub fn enqueue(&mut self, hold: NodeId, contender: Contender) -> CapacityResult<()> {
        self.holds.enqueue(hold, contender)
    }

    pub fn peek_winner(&self, hold: NodeId, arbiter: &Arbiter, now: Tick) -> Option<AircraftId> {
        self.holds.peek_winner(hold, arbiter, now)
    }

    pub fn release_hold(&mut self, hold: NodeId, aircraft: AircraftId) -> bool {
        self.holds.release(hold, aircraft)
    }

    // ── Runways ───────────────────────────────────────────────────────────

    pub fn try_acquire_runway(&mut self, edge: EdgeId, aircraft: AircraftId) -> bool {
        self.runways.try_acquire(edge, aircraft)
    }

    pub fn release_runway(&mut self, edge: EdgeId) -> Option<AircraftId> {
        self.runways.release(edge)
    }
}
