//! Simulation time model.
//!
//! Time is a monotonically increasing integer `Tick`.  `SimClock` maps ticks
//! to simulated seconds:
//!
//!   time_secs = tick * time_step_secs
//!
//! All ordering (queue arrival, release due times) is done on ticks so it is
//! exact; seconds are only used for physics and for reporting.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick.  Default: 1.0.
    pub time_step_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(time_step_secs: f64) -> Self {
        Self { time_step_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds at the start of the current tick.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.time_step_secs
    }

    /// How many ticks span `secs` seconds? (rounds up, never early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 || self.time_step_secs <= 0.0 {
            return 0;
        }
        (secs / self.time_step_secs).ceil() as u64
    }

    /// Break elapsed time into (hour, minute, second) components.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total = self.elapsed_secs().max(0.0) as u64;
        (total / 3_600, ((total % 3_600) / 60) as u32, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}
