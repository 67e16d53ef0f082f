//! Runway locks: at most one aircraft per runway edge.

use std::collections::BTreeMap;

use gs_core::{AircraftId, EdgeId};
use gs_layout::Layout;

#[derive(Clone, Debug, Default)]
pub struct RunwayLocks {
    holders: BTreeMap<EdgeId, Option<AircraftId>>,
}

impl RunwayLocks {
    pub fn from_layout(layout: &Layout) -> Self {
        Self { holders: layout.runway_edges().map(|e| (e.id, None)).collect() }
    }

    /// Take the lock on `edge` for `aircraft`.  Succeeds if the lock is free
    /// or already held by the same aircraft; fails for non-runway edges.
    pub fn try_acquire(&mut self, edge: EdgeId, aircraft: AircraftId) -> bool {
        let Some(slot) = self.holders.get_mut(&edge) else { return false };
        match *slot {
            None => {
                *slot = Some(aircraft);
                true
            }
            Some(holder) => holder == aircraft,
        }
    }

    /// Free the lock on `edge`.  Returns the previous holder.
    pub fn release(&mut self, edge: EdgeId) -> Option<AircraftId> {
        self.holders.get_mut(&edge).and_then(Option::take)
    }

    pub fn holder(&self, edge: EdgeId) -> Option<AircraftId> {
        self.holders.get(&edge).copied().flatten()
    }

    pub fn is_runway(&self, edge: EdgeId) -> bool {
        self.holders.contains_key(&edge)
    }

    pub fn occupied_count(&self) -> usize {
        self.holders.values().filter(|h| h.is_some()).count()
    }
}
