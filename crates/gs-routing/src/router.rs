//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The movement model and the spawner only see the [`Router`] trait, so a
//! different search (A*, time-expanded, reservation-based) can be dropped in
//! without touching them.
//!
//! # Cost units
//!
//! Costs are integer **millimetres** (`u64`) so equal-length alternatives
//! compare exactly.  Among equal-cost predecessors the one reached through the
//! lower edge id wins.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gs_core::{EdgeId, MovementType, NodeId, SizeClass};
use gs_layout::{Layout, Leg};
use gs_rules::Rules;

use crate::{RoutingError, RoutingResult};

// ── Route ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Legs to traverse in order.
    pub legs:   Vec<Leg>,
    /// Sum of the traversed edge lengths.
    pub length: f64,
}

impl Route {
    /// `true` if origin and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.legs.last().map(|l| l.to)
    }
}

// ── RouteRequest ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub origin:      NodeId,
    pub destination: NodeId,
    pub movement:    MovementType,
    pub size:        SizeClass,
    /// Edges the search must not use.  Sorted ascending.
    pub blocked:     &'a [EdgeId],
    /// Edges whose cost is doubled.  Sorted ascending.
    pub congested:   &'a [EdgeId],
}

impl RouteRequest<'static> {
    pub fn new(origin: NodeId, destination: NodeId, movement: MovementType, size: SizeClass) -> Self {
        Self { origin, destination, movement, size, blocked: &[], congested: &[] }
    }
}

impl RouteRequest<'_> {
    /// `true` if the request depends only on the layout and the snapshot,
    /// which is what makes it cacheable.
    pub fn is_plain(&self) -> bool {
        self.blocked.is_empty() && self.congested.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so a simulation holding one can be
/// moved to and shared with worker threads.
pub trait Router: Send + Sync {
    /// Shortest route using only legs `rules` admits for the request's
    /// movement type and size.  `origin == destination` is an empty route.
    fn route(&self, rules: &Rules<'_>, request: &RouteRequest<'_>) -> RoutingResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra over the layout's CSR leg adjacency.
#[derive(Debug, Default, Clone, Copy)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, rules: &Rules<'_>, request: &RouteRequest<'_>) -> RoutingResult<Route> {
        dijkstra(rules, request)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[inline]
fn leg_cost_mm(layout: &Layout, leg: Leg, congested: &[EdgeId]) -> u64 {
    let mm = (layout.leg_length(leg) * 1000.0).round() as u64;
    if congested.binary_search(&leg.edge).is_ok() { mm.saturating_mul(2) } else { mm }
}

fn dijkstra(rules: &Rules<'_>, req: &RouteRequest<'_>) -> RoutingResult<Route> {
    let layout = rules.layout;
    let n = layout.node_count();
    if req.origin.index() >= n {
        return Err(RoutingError::NodeNotFound(req.origin));
    }
    if req.destination.index() >= n {
        return Err(RoutingError::NodeNotFound(req.destination));
    }
    if req.origin == req.destination {
        return Ok(Route { legs: Vec::new(), length: 0.0 });
    }

    // dist[v] = best known cost (mm) to reach v.
    let mut dist = vec![u64::MAX; n];
    // prev[v] = leg that reached v.
    let mut prev: Vec<Option<Leg>> = vec![None; n];
    let mut settled = vec![false; n];

    dist[req.origin.index()] = 0;

    // Min-heap on (cost, node); NodeId as secondary key keeps pops deterministic.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, req.origin)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if settled[node.index()] || cost > dist[node.index()] {
            continue;
        }
        settled[node.index()] = true;
        if node == req.destination {
            return Ok(reconstruct(layout, &prev, req.destination));
        }

        for &leg in layout.legs_from(node) {
            if req.blocked.binary_search(&leg.edge).is_ok() {
                continue;
            }
            if !rules.is_admissible(leg, req.movement, req.size) {
                continue;
            }
            let next = leg.to.index();
            if settled[next] {
                continue;
            }
            let new_cost = cost.saturating_add(leg_cost_mm(layout, leg, req.congested));
            let better = new_cost < dist[next]
                || (new_cost == dist[next] && prev[next].is_some_and(|p| leg.edge < p.edge));
            if better {
                dist[next] = new_cost;
                prev[next] = Some(leg);
                heap.push(Reverse((new_cost, leg.to)));
            }
        }
    }

    Err(RoutingError::NoPath { from: req.origin, to: req.destination })
}

fn reconstruct(layout: &Layout, prev: &[Option<Leg>], to: NodeId) -> Route {
    let mut legs = Vec::new();
    let mut cur = to;
    while let Some(leg) = prev[cur.index()] {
        legs.push(leg);
        cur = leg.from;
    }
    legs.reverse();
    let length = legs.iter().map(|l| layout.leg_length(*l)).sum();
    Route { legs, length }
}
