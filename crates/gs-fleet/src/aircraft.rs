//! Per-aircraft state.

use gs_core::{AircraftId, EdgeId, MovementType, NodeId, SizeClass, Tick};
use gs_layout::Leg;
use gs_rules::Contender;

/// Why a waiting aircraft is not moving.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WaitReason {
    /// Queued at a hold point until the queue releases it.
    HoldPoint(NodeId),
    /// At the boundary into a hold point whose queue is at its limit.
    HoldFull(NodeId),
    /// At a boundary until the runway lock can be taken.
    RunwayLock(EdgeId),
    /// At a boundary because an edge ahead is closed and no reroute exists.
    Blocked(EdgeId),
    /// At a boundary because the next edge is at its capacity hint or its
    /// last entrant is still within separation.
    Congested(EdgeId),
}

/// Lifecycle:
///
/// ```text
/// Spawned → Taxiing | OnRunway ⇄ Waiting(reason) → … → Despawned
/// ```
///
/// `OnRunway` is `Taxiing` on a runway edge, kept distinct for lock accounting.
/// `Despawned` is terminal and set exactly once.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AircraftStatus {
    Spawned,
    Taxiing,
    OnRunway,
    Waiting(WaitReason),
    Despawned,
}

impl AircraftStatus {
    #[inline]
    pub fn is_waiting(self) -> bool {
        matches!(self, AircraftStatus::Waiting(_))
    }
}

#[derive(Clone, Debug)]
pub struct Aircraft {
    pub id:              AircraftId,
    pub size:            SizeClass,
    pub movement:        MovementType,
    /// Forward-only sequence of legs; never shrinks behind `leg_index`.
    pub route:           Vec<Leg>,
    pub leg_index:       usize,
    /// Distance travelled along the current leg, 0 ≤ position ≤ leg length.
    pub position:        f64,
    /// Speed committed in the last tick, units per second.
    pub speed:           f64,
    pub status:          AircraftStatus,
    /// Origin gate for departures, destination gate for arrivals.
    pub gate:            NodeId,
    pub spawn_tick:      Tick,
    pub completion_tick: Option<Tick>,
    pub wait_ticks:      u64,
    /// Tick the aircraft joined its current queue, if it is in one.
    pub queued_at:       Option<Tick>,
    pub reroutes:        u32,
    /// Runway edge whose lock this aircraft holds.
    pub runway_lock:     Option<EdgeId>,
    /// Departures only: the origin gate has been handed back.
    pub gate_released:   bool,
}

impl Aircraft {
    pub fn new(
        id: AircraftId,
        size: SizeClass,
        movement: MovementType,
        route: Vec<Leg>,
        gate: NodeId,
        spawn_tick: Tick,
    ) -> Self {
        Self {
            id,
            size,
            movement,
            route,
            leg_index: 0,
            position: 0.0,
            speed: 0.0,
            status: AircraftStatus::Spawned,
            gate,
            spawn_tick,
            completion_tick: None,
            wait_ticks: 0,
            queued_at: None,
            reroutes: 0,
            runway_lock: None,
            gate_released: false,
        }
    }

    #[inline]
    pub fn current_leg(&self) -> Option<Leg> {
        self.route.get(self.leg_index).copied()
    }

    #[inline]
    pub fn next_leg(&self) -> Option<Leg> {
        self.route.get(self.leg_index + 1).copied()
    }

    #[inline]
    pub fn on_last_leg(&self) -> bool {
        self.leg_index + 1 >= self.route.len()
    }

    /// Final node of the route.
    pub fn destination(&self) -> Option<NodeId> {
        self.route.last().map(|l| l.to)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status == AircraftStatus::Despawned
    }

    /// Snapshot for priority ranking.
    pub fn contender(&self) -> Contender {
        Contender {
            id: self.id,
            movement: self.movement,
            size: self.size,
            queued_at: self.queued_at.unwrap_or(self.spawn_tick),
        }
    }

    /// Enter the terminal state.  Has no effect if already despawned.
    pub fn despawn(&mut self, now: Tick) {
        if self.is_terminal() {
            return;
        }
        self.status = AircraftStatus::Despawned;
        self.completion_tick = Some(now);
        self.speed = 0.0;
        self.queued_at = None;
    }

    /// Ticks from spawn to completion (or to `now` while still live).
    pub fn ticks_alive(&self, now: Tick) -> u64 {
        self.completion_tick.unwrap_or(now).since(self.spawn_tick)
    }
}
