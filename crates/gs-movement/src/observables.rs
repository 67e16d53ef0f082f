//! What one tick produced, for the metrics collector and observers.

use std::collections::BTreeMap;

use gs_core::{AircraftId, EdgeId, MovementType, NodeId, SizeClass, Tick};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunwayEventKind {
    Entered,
    Exited,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RunwayEvent {
    pub tick:     Tick,
    pub aircraft: AircraftId,
    pub edge:     EdgeId,
    pub kind:     RunwayEventKind,
}

/// Summary of one completed flight, built when the aircraft despawns.
#[derive(Clone, PartialEq, Debug)]
pub struct FlightRecord {
    pub id:              AircraftId,
    pub movement:        MovementType,
    pub size:            SizeClass,
    pub gate:            NodeId,
    pub spawn_tick:      Tick,
    pub completion_tick: Tick,
    /// Spawn to completion, seconds.
    pub duration_secs:   f64,
    /// Time spent in any waiting state, seconds.
    pub wait_secs:       f64,
    /// Total length of the legs flown.
    pub distance:        f64,
    pub reroutes:        u32,
}

impl FlightRecord {
    /// Time actually spent moving, seconds.
    #[inline]
    pub fn taxi_secs(&self) -> f64 {
        (self.duration_secs - self.wait_secs).max(0.0)
    }
}

/// Per-tick observables.  Everything is measured after the commit phase.
#[derive(Clone, Debug, Default)]
pub struct TickObservables {
    pub tick:             Tick,
    /// Simulated seconds at the start of `tick`.
    pub time_secs:        f64,
    /// Live aircraft on each edge (either direction).  Empty edges are absent.
    pub edge_occupancy:   BTreeMap<EdgeId, u32>,
    /// Queue length at every hold point, ascending node id.
    pub hold_queues:      Vec<(NodeId, usize)>,
    pub runways_occupied: usize,
    pub runway_events:    Vec<RunwayEvent>,
    pub live_departures:  usize,
    pub live_arrivals:    usize,
    /// Flights that completed this tick, ascending id.
    pub completed:        Vec<FlightRecord>,
    /// Filled in by the runner from the spawner's report.
    pub spawned:          u32,
    pub deferred_spawns:  u32,
    pub routing_failures: u32,
    pub warnings:         Vec<String>,
}

impl TickObservables {
    pub fn new(tick: Tick, time_secs: f64) -> Self {
        Self { tick, time_secs, ..Self::default() }
    }

    #[inline]
    pub fn live(&self) -> usize {
        self.live_departures + self.live_arrivals
    }

    pub fn total_queued(&self) -> usize {
        self.hold_queues.iter().map(|(_, n)| n).sum()
    }

    pub fn runway_entries(&self) -> usize {
        self.runway_events.iter().filter(|e| e.kind == RunwayEventKind::Entered).count()
    }
}
