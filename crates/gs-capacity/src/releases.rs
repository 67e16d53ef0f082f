//! `ReleaseQueue` — gate releases scheduled for a future tick.
//!
//! An arrival keeps its gate for the turnaround time after it despawns; a
//! departure hands its gate back once it leaves the apron.  Both are pushed
//! here with a due tick and drained by capacity housekeeping at the start of
//! the model step, so a release never takes effect in the middle of a tick.
//!
//! `BTreeMap` keyed by tick keeps draining O(log W) in the number of
//! distinct due ticks.

use std::collections::BTreeMap;

use gs_core::{NodeId, Tick};

#[derive(Clone, Debug, Default)]
pub struct ReleaseQueue {
    inner: BTreeMap<Tick, Vec<NodeId>>,
    total: usize,
}

impl ReleaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, due: Tick, gate: NodeId) {
        self.inner.entry(due).or_default().push(gate);
        self.total += 1;
    }

    /// Remove and return every gate due at or before `now`, in due order.
    pub fn drain_due(&mut self, now: Tick) -> Vec<NodeId> {
        let later = self.inner.split_off(&Tick(now.0 + 1));
        let due = std::mem::replace(&mut self.inner, later);
        let gates: Vec<NodeId> = due.into_values().flatten().collect();
        self.total -= gates.len();
        gates
    }

    /// The earliest due tick, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
