//! Deterministic per-aircraft and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every random draw in a run descends from the single `run.seed`:
//!
//! - `SimRng` streams are derived from the seed with fixed offsets (one for
//!   the environment sampler, one for the spawner) so adding draws to one
//!   stream never shifts another.
//! - Each aircraft gets its own `SmallRng` seeded by
//!
//!     seed = run_seed XOR (aircraft_id * MIXING_CONSTANT)
//!
//!   so movement noise does not depend on how many other aircraft exist or
//!   on the order in which the intent phase visits them.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AircraftId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AircraftRng ───────────────────────────────────────────────────────────────

/// Per-aircraft deterministic RNG, used for the bounded movement noise term.
pub struct AircraftRng(SmallRng);

impl AircraftRng {
    pub fn new(run_seed: u64, aircraft: AircraftId) -> Self {
        let seed = run_seed ^ (aircraft.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        AircraftRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in `[-amplitude, +amplitude]`; zero without consuming
    /// state when `amplitude` is not positive.
    #[inline]
    pub fn symmetric(&mut self, amplitude: f64) -> f64 {
        if amplitude > 0.0 {
            self.0.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for the environment sampler and the spawner.
///
/// Used only from the single-threaded tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// A stream derived directly from `seed` and a fixed `offset`, without
    /// consuming any state from another generator.
    pub fn stream(seed: u64, offset: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed ^ offset.wrapping_mul(MIXING_CONSTANT)))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Index drawn proportionally to `weights`.  `None` when the weights are
    /// empty, negative or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.0))
    }
}
