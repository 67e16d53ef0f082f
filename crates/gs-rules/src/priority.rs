//! Priority ordering among aircraft competing for a hold-point release or a
//! runway lock.
//!
//! `priority_rank(a, b, ..)` returns `Ordering::Less` when `a` goes first.
//! Every mode ends with the fifo key (queued tick, then aircraft id), and ids
//! are unique, so the result is a total order.

use std::cmp::Ordering;

use gs_core::{AircraftId, MovementType, SizeClass, Tick};
use gs_params::{Parameters, PriorityMode, PriorityWeights};

/// What the priority rules know about a waiting aircraft.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Contender {
    pub id:        AircraftId,
    pub movement:  MovementType,
    pub size:      SizeClass,
    /// Tick at which the aircraft joined the queue.
    pub queued_at: Tick,
}

/// Weighted-mode score at `now`.  Higher goes first.
pub fn priority_score(c: &Contender, weights: &PriorityWeights, now: Tick, time_step_secs: f64) -> f64 {
    let movement = match c.movement {
        MovementType::Departure => weights.departure,
        MovementType::Arrival => weights.arrival,
    };
    let waited_secs = now.since(c.queued_at) as f64 * time_step_secs;
    movement + weights.size * f64::from(c.size.rank()) + weights.wait * waited_secs
}

pub fn priority_rank(
    a: &Contender,
    b: &Contender,
    mode: PriorityMode,
    weights: &PriorityWeights,
    now: Tick,
    time_step_secs: f64,
) -> Ordering {
    let primary = match mode {
        PriorityMode::Fifo => Ordering::Equal,
        PriorityMode::DepartFirst => bucket(a, MovementType::Departure).cmp(&bucket(b, MovementType::Departure)),
        PriorityMode::ArriveFirst => bucket(a, MovementType::Arrival).cmp(&bucket(b, MovementType::Arrival)),
        PriorityMode::SizePriority => b.size.cmp(&a.size),
        PriorityMode::Weighted => {
            let sa = priority_score(a, weights, now, time_step_secs);
            let sb = priority_score(b, weights, now, time_step_secs);
            sb.total_cmp(&sa)
        }
    };
    primary.then_with(|| fifo(a, b))
}

/// 0 for the favored movement type, 1 otherwise.
#[inline]
fn bucket(c: &Contender, favored: MovementType) -> u8 {
    u8::from(c.movement != favored)
}

#[inline]
fn fifo(a: &Contender, b: &Contender) -> Ordering {
    a.queued_at.cmp(&b.queued_at).then(a.id.cmp(&b.id))
}

// ── Arbiter ───────────────────────────────────────────────────────────────────

/// A priority mode bound to its weights and the tick length, ready to rank
/// contenders for one kind of resource.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arbiter {
    pub mode:           PriorityMode,
    pub weights:        PriorityWeights,
    pub time_step_secs: f64,
}

impl Arbiter {
    pub fn new(mode: PriorityMode, params: &Parameters) -> Self {
        Self { mode, weights: params.priority.weights, time_step_secs: params.run.time_step_secs }
    }

    /// Arbiter for hold-point releases.
    pub fn hold_release(params: &Parameters) -> Self {
        Self::new(params.priority.hold_release, params)
    }

    /// Arbiter for aircraft waiting on the same runway lock.
    pub fn runway(params: &Parameters) -> Self {
        Self::new(params.priority.runway, params)
    }

    #[inline]
    pub fn compare(&self, a: &Contender, b: &Contender, now: Tick) -> Ordering {
        priority_rank(a, b, self.mode, &self.weights, now, self.time_step_secs)
    }

    /// The contender that goes first, if any.
    pub fn winner<'c, I>(&self, contenders: I, now: Tick) -> Option<&'c Contender>
    where
        I: IntoIterator<Item = &'c Contender>,
    {
        contenders.into_iter().min_by(|a, b| self.compare(a, b, now))
    }
}
