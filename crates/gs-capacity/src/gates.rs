//! Gate occupancy.
//!
//! A gate is held by one aircraft from the moment it is reserved (departure
//! spawn, or arrival spawn for its destination) until it is released, either
//! immediately or through the release queue after turnaround.

use std::collections::BTreeMap;

use gs_core::{AircraftId, NodeId, SizeClass};
use gs_layout::Layout;
use gs_params::Parameters;

use crate::{CapacityError, CapacityResult, Resource};

#[derive(Clone, Debug)]
struct GateSlot {
    apron:    Option<String>,
    max_size: Option<SizeClass>,
    occupant: Option<AircraftId>,
}

#[derive(Clone, Debug, Default)]
pub struct GateTable {
    slots:        BTreeMap<NodeId, GateSlot>,
    apron_limits: BTreeMap<String, u32>,
    enforce_size: bool,
}

impl GateTable {
    pub fn from_layout(layout: &Layout, params: &Parameters) -> Self {
        let slots = layout
            .gates()
            .map(|n| {
                (n.id, GateSlot { apron: n.apron.clone(), max_size: n.max_size, occupant: None })
            })
            .collect();
        let mut table = Self { slots, ..Self::default() };
        table.apply_parameters(params);
        table
    }

    pub fn apply_parameters(&mut self, params: &Parameters) {
        self.apron_limits = params.capacity.apron_limits.clone();
        self.enforce_size = params.access.enforce_size_limits;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn gate_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.keys().copied()
    }

    pub fn occupant(&self, gate: NodeId) -> Option<AircraftId> {
        self.slots.get(&gate).and_then(|s| s.occupant)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.values().filter(|s| s.occupant.is_some()).count()
    }

    fn fits(&self, slot: &GateSlot, size: SizeClass) -> bool {
        !self.enforce_size || slot.max_size.is_none_or(|limit| size.fits(limit))
    }

    fn apron_has_room(&self, apron: Option<&str>) -> bool {
        let Some(apron) = apron else { return true };
        let Some(&limit) = self.apron_limits.get(apron) else { return true };
        let used = self
            .slots
            .values()
            .filter(|s| s.occupant.is_some() && s.apron.as_deref() == Some(apron))
            .count();
        (used as u32) < limit
    }

    fn available(&self, slot: &GateSlot) -> bool {
        slot.occupant.is_none() && self.apron_has_room(slot.apron.as_deref())
    }

    /// Reserve any gate that fits `size`, trying gates in the preferred apron
    /// group first, then all others, each in ascending gate id order.
    pub fn acquire(
        &mut self,
        size: SizeClass,
        preference: Option<&str>,
        aircraft: AircraftId,
    ) -> CapacityResult<NodeId> {
        if !self.slots.values().any(|s| self.fits(s, size)) {
            return Err(CapacityError::CapacityExhausted { resource: Resource::AnyGate(size) });
        }
        let pick = |preferred_only: bool| {
            self.slots
                .iter()
                .filter(|(_, s)| !preferred_only || s.apron.as_deref() == preference)
                .find(|(_, s)| self.fits(s, size) && self.available(s))
                .map(|(id, _)| *id)
        };
        let chosen = if preference.is_some() { pick(true).or_else(|| pick(false)) } else { pick(false) };
        let gate =
            chosen.ok_or(CapacityError::AcquisitionFailure { resource: Resource::AnyGate(size) })?;
        if let Some(slot) = self.slots.get_mut(&gate) {
            slot.occupant = Some(aircraft);
        }
        Ok(gate)
    }

    /// Reserve one specific gate.
    pub fn acquire_specific(
        &mut self,
        gate: NodeId,
        size: SizeClass,
        aircraft: AircraftId,
    ) -> CapacityResult<()> {
        let slot = self.slots.get(&gate).ok_or(CapacityError::Unknown(Resource::Gate(gate)))?;
        if !self.fits(slot, size) {
            return Err(CapacityError::CapacityExhausted { resource: Resource::Gate(gate) });
        }
        if !self.available(slot) {
            return Err(CapacityError::AcquisitionFailure { resource: Resource::Gate(gate) });
        }
        if let Some(slot) = self.slots.get_mut(&gate) {
            slot.occupant = Some(aircraft);
        }
        Ok(())
    }

    /// Free a gate.  Returns the aircraft that held it.
    pub fn release(&mut self, gate: NodeId) -> Option<AircraftId> {
        self.slots.get_mut(&gate).and_then(|s| s.occupant.take())
    }
}
