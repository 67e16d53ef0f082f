//! Hold-point queues.
//!
//! Each hold point owns a queue of [`Contender`] snapshots.  Entries are kept
//! in arrival order; the release order is computed on demand by an
//! [`Arbiter`], since weighted scores change as aircraft wait.

use std::collections::BTreeMap;

use gs_core::{AircraftId, NodeId, Tick};
use gs_layout::Layout;
use gs_rules::{Arbiter, Contender};

use crate::{CapacityError, CapacityResult, Resource};

#[derive(Clone, Debug, Default)]
pub struct HoldQueues {
    queues: BTreeMap<NodeId, Vec<Contender>>,
    limit:  u32,
}

impl HoldQueues {
    pub fn from_layout(layout: &Layout, limit: u32) -> Self {
        let queues = layout.hold_points().map(|n| (n.id, Vec::new())).collect();
        Self { queues, limit }
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    pub fn is_hold(&self, node: NodeId) -> bool {
        self.queues.contains_key(&node)
    }

    /// Add an aircraft to a hold queue.  Enqueuing an aircraft that is
    /// already queued there is a no-op.
    pub fn enqueue(&mut self, hold: NodeId, contender: Contender) -> CapacityResult<()> {
        let queue = self.queues.get_mut(&hold).ok_or(CapacityError::Unknown(Resource::Hold(hold)))?;
        if queue.iter().any(|c| c.id == contender.id) {
            return Ok(());
        }
        if queue.len() >= self.limit as usize {
            return Err(CapacityError::CapacityExhausted { resource: Resource::Hold(hold) });
        }
        queue.push(contender);
        Ok(())
    }

    /// The aircraft the queue would release next.
    pub fn peek_winner(&self, hold: NodeId, arbiter: &Arbiter, now: Tick) -> Option<AircraftId> {
        let queue = self.queues.get(&hold)?;
        arbiter.winner(queue, now).map(|c| c.id)
    }

    /// Remove an aircraft from a queue.  Returns `false` if it was not there.
    pub fn release(&mut self, hold: NodeId, aircraft: AircraftId) -> bool {
        let Some(queue) = self.queues.get_mut(&hold) else { return false };
        match queue.iter().position(|c| c.id == aircraft) {
            Some(i) => {
                queue.remove(i);
                true
            }
            None => false,
        }
    }

    /// Queue contents in release order.
    pub fn ordered(&self, hold: NodeId, arbiter: &Arbiter, now: Tick) -> Vec<AircraftId> {
        let Some(queue) = self.queues.get(&hold) else { return Vec::new() };
        let mut sorted: Vec<&Contender> = queue.iter().collect();
        sorted.sort_by(|a, b| arbiter.compare(a, b, now));
        sorted.into_iter().map(|c| c.id).collect()
    }

    pub fn contains(&self, hold: NodeId, aircraft: AircraftId) -> bool {
        self.queues.get(&hold).is_some_and(|q| q.iter().any(|c| c.id == aircraft))
    }

    pub fn len(&self, hold: NodeId) -> usize {
        self.queues.get(&hold).map_or(0, Vec::len)
    }

    pub fn total_len(&self) -> usize {
        self.queues.values().map(Vec::len).sum()
    }

    /// (hold, queue length) for every hold point, ascending node id.
    pub fn lengths(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.queues.iter().map(|(id, q)| (*id, q.len()))
    }
}
