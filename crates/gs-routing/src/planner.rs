//! Route cache and rerouting on top of any [`Router`].
//!
//! Plain requests (no blocked or congested edges) depend only on the layout
//! and the access-relevant part of the snapshot, so their results, failures
//! included, are cached by (origin, destination, movement, size).  The cache
//! is dropped when a new snapshot changes access.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use gs_core::{EdgeId, MovementType, NodeId, SizeClass};
use gs_layout::Leg;
use gs_params::Parameters;
use gs_rules::Rules;

use crate::router::{Route, RouteRequest, Router};
use crate::{RoutingError, RoutingResult};

type RouteKey = (NodeId, NodeId, MovementType, SizeClass);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RerouteReason {
    /// An edge ahead became inadmissible under a new snapshot.
    EdgeClosed,
    /// The next edge is at its capacity hint.
    Congestion,
}

/// An in-flight aircraft's route state, as the planner needs it.
#[derive(Debug, Clone, Copy)]
pub struct RerouteRequest<'a> {
    pub legs:        &'a [Leg],
    /// Index of the leg the aircraft is on.  It is kept as is.
    pub current:     usize,
    pub destination: NodeId,
    pub movement:    MovementType,
    pub size:        SizeClass,
    /// Edges to penalize (used with `RerouteReason::Congestion`).  Sorted.
    pub congested:   &'a [EdgeId],
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannerStats {
    pub hits:          u64,
    pub misses:        u64,
    pub invalidations: u64,
    pub reroutes:      u64,
}

pub struct RoutePlanner<R: Router> {
    router: R,
    cache:  FxHashMap<RouteKey, RoutingResult<Route>>,
    stats:  PlannerStats,
}

impl<R: Router> RoutePlanner<R> {
    pub fn new(router: R) -> Self {
        Self { router, cache: FxHashMap::default(), stats: PlannerStats::default() }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn stats(&self) -> PlannerStats {
        self.stats
    }

    pub fn cached_routes(&self) -> usize {
        self.cache.len()
    }

    pub fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            self.stats.invalidations += 1;
        }
        self.cache.clear();
    }

    /// Drop cached routes if the new snapshot changes admissibility.
    pub fn refresh(&mut self, old: &Parameters, new: &Parameters) {
        if new.touches_access(old) {
            debug!(version = new.version, "access parameters changed; route cache cleared");
            self.invalidate();
        }
    }

    /// Shortest admissible route, served from the cache when possible.
    pub fn route(
        &mut self,
        rules: &Rules<'_>,
        origin: NodeId,
        destination: NodeId,
        movement: MovementType,
        size: SizeClass,
    ) -> RoutingResult<Route> {
        let key = (origin, destination, movement, size);
        if let Some(hit) = self.cache.get(&key) {
            self.stats.hits += 1;
            return hit.clone();
        }
        self.stats.misses += 1;
        let request = RouteRequest::new(origin, destination, movement, size);
        let result = self.router.route(rules, &request);
        self.cache.insert(key, result.clone());
        result
    }

    /// Recompute the remainder of a route from the end of the current leg.
    ///
    /// The returned route keeps `legs[..=current]` unchanged.  Every edge in
    /// that prefix is blocked for the search, so the new tail never doubles
    /// back over ground already covered.
    pub fn reroute(
        &mut self,
        rules: &Rules<'_>,
        req: &RerouteRequest<'_>,
        reason: RerouteReason,
    ) -> RoutingResult<Vec<Leg>> {
        let Some(current) = req.legs.get(req.current) else {
            return Err(RoutingError::NoPath { from: NodeId::INVALID, to: req.destination });
        };
        let mut blocked: Vec<EdgeId> = req.legs[..=req.current].iter().map(|l| l.edge).collect();
        blocked.sort_unstable();
        blocked.dedup();

        let request = RouteRequest {
            origin: current.to,
            destination: req.destination,
            movement: req.movement,
            size: req.size,
            blocked: &blocked,
            congested: if reason == RerouteReason::Congestion { req.congested } else { &[] },
        };
        match self.router.route(rules, &request) {
            Ok(tail) => {
                self.stats.reroutes += 1;
                let mut legs = req.legs[..=req.current].to_vec();
                legs.extend(tail.legs);
                debug!(?reason, from = %current.to, to = %req.destination, "rerouted");
                Ok(legs)
            }
            Err(e) => {
                warn!(?reason, error = %e, "reroute failed");
                Err(e)
            }
        }
    }
}
