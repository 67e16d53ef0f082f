//! The `MovementModel` trait, the pluggable per-tick state transition.

use gs_capacity::CapacityManager;
use gs_core::{SimClock, Tick};
use gs_fleet::Fleet;
use gs_layout::Layout;
use gs_params::{Environment, Parameters};
use gs_routing::{RoutePlanner, Router};
use gs_rules::Rules;

use crate::TickObservables;

/// Read-only inputs of one model step.
#[derive(Copy, Clone)]
pub struct MovementContext<'a> {
    pub layout:         &'a Layout,
    pub params:         &'a Parameters,
    pub env:            &'a Environment,
    pub clock:          &'a SimClock,
    /// `true` on the first tick after a parameter snapshot replacement.
    /// Routes are only re-checked for closed edges on such ticks.
    pub params_changed: bool,
}

impl<'a> MovementContext<'a> {
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.clock.time_step_secs
    }

    #[inline]
    pub fn rules(&self) -> Rules<'a> {
        Rules::new(self.layout, self.params)
    }
}

/// The mutable parts of the world a model step may change.
pub struct StepState<'w, R: Router> {
    pub fleet:    &'w mut Fleet,
    pub capacity: &'w mut CapacityManager,
    pub planner:  &'w mut RoutePlanner<R>,
}

/// Pluggable movement model.
///
/// A step advances every live aircraft by one tick, acquires and releases
/// capacity on their behalf, retires the ones that despawned, and reports
/// what happened.
///
/// Implementations must be deterministic given the world, the context and
/// the per-aircraft RNGs in `state.fleet.rngs`, and must visit aircraft in
/// ascending id wherever order affects the outcome.
///
/// # Example
///
/// ```rust,ignore
/// struct Frozen;
///
/// impl MovementModel for Frozen {
///     fn step<R: Router>(&self, ctx: &MovementContext<'_>, _: &mut StepState<'_, R>) -> TickObservables {
///         TickObservables::new(ctx.now(), ctx.clock.elapsed_secs())
///     }
/// }
/// ```
pub trait MovementModel: Send + Sync + 'static {
    fn step<R: Router>(&self, ctx: &MovementContext<'_>, state: &mut StepState<'_, R>) -> TickObservables;
}
