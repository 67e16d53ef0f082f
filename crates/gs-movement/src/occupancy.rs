//! `LegOccupancy` — positions of live aircraft grouped by leg.
//!
//! Built from the fleet at the start of the commit phase and updated as each
//! aircraft commits, so a lookup sees committed positions for aircraft
//! already processed this tick and start-of-tick positions for the rest.

use rustc_hash::FxHashMap;

use gs_core::{AircraftId, EdgeId};
use gs_fleet::Fleet;
use gs_layout::Leg;

#[derive(Debug, Default)]
pub struct LegOccupancy {
    legs:  FxHashMap<Leg, Vec<(AircraftId, f64)>>,
    edges: FxHashMap<EdgeId, u32>,
}

impl LegOccupancy {
    pub fn from_fleet(fleet: &Fleet) -> Self {
        let mut occ = Self::default();
        for a in fleet.iter().filter(|a| !a.is_terminal()) {
            if let Some(leg) = a.current_leg() {
                occ.insert(a.id, leg, a.position);
            }
        }
        occ
    }

    fn insert(&mut self, id: AircraftId, leg: Leg, position: f64) {
        self.legs.entry(leg).or_default().push((id, position));
        *self.edges.entry(leg.edge).or_default() += 1;
    }

    fn remove(&mut self, id: AircraftId, leg: Leg) {
        if let Some(entries) = self.legs.get_mut(&leg) {
            if let Some(i) = entries.iter().position(|(a, _)| *a == id) {
                entries.swap_remove(i);
                if let Some(n) = self.edges.get_mut(&leg.edge) {
                    *n = n.saturating_sub(1);
                }
            }
        }
    }

    /// Record that `id` moved from `from` to `to` (either may be absent).
    pub fn update(&mut self, id: AircraftId, from: Option<Leg>, to: Option<(Leg, f64)>) {
        if let Some(leg) = from {
            self.remove(id, leg);
        }
        if let Some((leg, position)) = to {
            self.insert(id, leg, position);
        }
    }

    /// Position of the nearest aircraft ahead of `id` on `leg`.  An aircraft
    /// at the same position counts as ahead when its id is lower.
    pub fn leader_position(&self, leg: Leg, id: AircraftId, position: f64) -> Option<f64> {
        self.legs
            .get(&leg)?
            .iter()
            .filter(|(other, p)| *other != id && (*p > position || (*p == position && *other < id)))
            .map(|(_, p)| *p)
            .min_by(f64::total_cmp)
    }

    /// Position of the rearmost aircraft on `leg`.
    pub fn tail_position(&self, leg: Leg) -> Option<f64> {
        self.legs.get(&leg)?.iter().map(|(_, p)| *p).min_by(f64::total_cmp)
    }

    /// Aircraft on `edge` in either direction.
    pub fn edge_count(&self, edge: EdgeId) -> u32 {
        self.edges.get(&edge).copied().unwrap_or(0)
    }

    /// `true` if some aircraft is on `leg`'s edge travelling the other way.
    pub fn is_opposed(&self, leg: Leg) -> bool {
        let same = self.legs.get(&leg).map_or(0, Vec::len) as u32;
        self.edge_count(leg.edge) > same
    }
}
