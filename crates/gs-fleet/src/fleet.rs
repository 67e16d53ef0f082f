//! `Fleet`: live aircraft keyed by id, their RNGs, and the completed list.
//!
//! # Why a separate `AircraftRngs`?
//!
//! The movement model's intent phase needs `&mut` access to every aircraft's
//! RNG while reading the aircraft themselves.  Keeping the RNGs in their own
//! field lets the caller borrow `&fleet.aircraft` and `&mut fleet.rngs` at the
//! same time.

use std::collections::BTreeMap;

use gs_core::{AircraftId, AircraftRng};

use crate::Aircraft;

// ── AircraftRngs ──────────────────────────────────────────────────────────────

/// Per-aircraft deterministic RNG state.
pub struct AircraftRngs {
    seed:      u64,
    pub inner: BTreeMap<AircraftId, AircraftRng>,
}

impl AircraftRngs {
    fn new(seed: u64) -> Self {
        Self { seed, inner: BTreeMap::new() }
    }

    fn seed_for(&mut self, id: AircraftId) {
        self.inner.insert(id, AircraftRng::new(self.seed, id));
    }

    #[inline]
    pub fn get_mut(&mut self, id: AircraftId) -> Option<&mut AircraftRng> {
        self.inner.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

pub struct Fleet {
    /// Live aircraft, iterated in ascending id order.
    pub aircraft:  BTreeMap<AircraftId, Aircraft>,
    pub rngs:      AircraftRngs,
    /// Despawned aircraft in completion order.
    pub completed: Vec<Aircraft>,
    next_id:       u32,
}

impl Fleet {
    pub fn new(run_seed: u64) -> Self {
        Self {
            aircraft: BTreeMap::new(),
            rngs: AircraftRngs::new(run_seed),
            completed: Vec::new(),
            next_id: 0,
        }
    }

    /// The id the next admitted aircraft will receive.
    #[inline]
    pub fn peek_next_id(&self) -> AircraftId {
        AircraftId(self.next_id)
    }

    /// Take ownership of a newly spawned aircraft and assign it the next id.
    pub fn admit(&mut self, mut aircraft: Aircraft) -> AircraftId {
        let id = AircraftId(self.next_id);
        self.next_id += 1;
        aircraft.id = id;
        self.rngs.seed_for(id);
        self.aircraft.insert(id, aircraft);
        id
    }

    #[inline]
    pub fn get(&self, id: AircraftId) -> Option<&Aircraft> {
        self.aircraft.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AircraftId) -> Option<&mut Aircraft> {
        self.aircraft.get_mut(&id)
    }

    /// Snapshot of live ids in ascending order.
    pub fn ids(&self) -> Vec<AircraftId> {
        self.aircraft.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aircraft> + '_ {
        self.aircraft.values()
    }

    pub fn live_count(&self) -> usize {
        self.aircraft.len()
    }

    /// Total aircraft ever admitted.
    pub fn spawned_count(&self) -> u64 {
        u64::from(self.next_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Move a despawned aircraft from the live set to the completed list.
    /// Returns `None` if the id is not live or the aircraft is not terminal.
    pub fn retire(&mut self, id: AircraftId) -> Option<&Aircraft> {
        if !self.aircraft.get(&id)?.is_terminal() {
            return None;
        }
        let aircraft = self.aircraft.remove(&id)?;
        self.rngs.inner.remove(&id);
        self.completed.push(aircraft);
        self.completed.last()
    }
}
