//! The intent phase.
//!
//! For each live aircraft: the target speed on its current edge under the
//! tick's weather, reached from the last committed speed at no more than
//! `movement.acceleration`, and a noise term in `[-noise, +noise]` drawn from
//! the aircraft's own RNG.  Every live aircraft draws exactly once per tick,
//! whatever its status, so an aircraft's noise sequence depends only on the
//! run seed, its id and its age.

use gs_core::AircraftId;
use gs_fleet::{Aircraft, Fleet};

use crate::MovementContext;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Intent {
    pub id:           AircraftId,
    /// Units per second: the rule-engine speed, capped by the acceleration
    /// step from the aircraft's current speed.
    pub target_speed: f64,
    pub noise:        f64,
}

impl Intent {
    /// Distance the aircraft would like to cover this tick.
    #[inline]
    pub fn advance(&self, dt: f64) -> f64 {
        ((self.target_speed + self.noise) * dt).max(0.0)
    }
}

fn target_speed(ctx: &MovementContext<'_>, aircraft: &Aircraft) -> f64 {
    let limit = aircraft
        .current_leg()
        .and_then(|leg| ctx.layout.edge(leg.edge))
        .map_or(0.0, |edge| ctx.rules().speed(aircraft.size, edge, ctx.env.weather));
    let ramp = aircraft.speed.max(0.0) + ctx.params.movement.acceleration * ctx.dt();
    limit.min(ramp)
}

/// One intent per live aircraft, ascending id.
pub fn compute_intents(ctx: &MovementContext<'_>, fleet: &mut Fleet) -> Vec<Intent> {
    let amplitude = ctx.params.movement.noise;
    // Explicit field borrows so the borrow checker sees disjoint access.
    let aircraft = &fleet.aircraft;
    let rngs = &mut fleet.rngs;

    #[cfg(not(feature = "parallel"))]
    {
        aircraft
            .values()
            .map(|a| {
                let noise = rngs.get_mut(a.id).map_or(0.0, |rng| rng.symmetric(amplitude));
                Intent { id: a.id, target_speed: target_speed(ctx, a), noise }
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        // Both maps are keyed by the same live ids, so their value iterators
        // line up.
        let planes: Vec<&Aircraft> = aircraft.values().collect();
        let rng_refs: Vec<_> = rngs.inner.values_mut().collect();
        debug_assert_eq!(planes.len(), rng_refs.len());

        planes
            .par_iter()
            .zip(rng_refs.into_par_iter())
            .map(|(a, rng)| Intent {
                id: a.id,
                target_speed: target_speed(ctx, a),
                noise: rng.symmetric(amplitude),
            })
            .collect()
    }
}
