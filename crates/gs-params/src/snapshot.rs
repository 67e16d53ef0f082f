//! `Parameters` snapshot and the per-tick sampled `Environment`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use gs_core::{SimRng, Weather};

use crate::categories::{
    AccessParams, CapacityParams, EnvironmentParams, MovementParams, PriorityParams, RunControl,
    SeparationParams, TrafficMode, TrafficParams,
};
use crate::value::Sample;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Immutable parameter snapshot.  Components receive it behind an `Arc` and
/// never observe a half-applied change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// 0 for the initial snapshot, +1 for every replacement.
    pub version:     u64,
    pub traffic:     TrafficParams,
    pub environment: EnvironmentParams,
    pub movement:    MovementParams,
    pub separation:  SeparationParams,
    pub priority:    PriorityParams,
    pub capacity:    CapacityParams,
    pub access:      AccessParams,
    pub run:         RunControl,
}

impl Parameters {
    /// `true` if admissibility (and therefore any cached route) could differ
    /// between the two snapshots.
    pub fn touches_access(&self, other: &Parameters) -> bool {
        self.access != other.access
    }

    /// Number of ticks needed to cover `run.duration_secs`.
    pub fn total_ticks(&self) -> u64 {
        if self.run.time_step_secs <= 0.0 {
            return 0;
        }
        (self.run.duration_secs / self.run.time_step_secs).ceil() as u64
    }

    pub fn is_edge_closed(&self, edge_key: &str) -> bool {
        self.access.closed_edges.contains(edge_key)
    }

    /// Resolve every stochastic environment and traffic parameter for one tick.
    ///
    /// Draw order is fixed (weather, wind direction, wind speed, departure
    /// rate, arrival rate) so the stream stays aligned across runs.
    pub fn sample_environment(&self, rng: &mut SimRng) -> Environment {
        let weather = self.environment.weather.sample(rng);
        let wind_direction_deg = self.environment.wind_direction.sample(rng).rem_euclid(360.0);
        let wind_speed = self.environment.wind_speed.sample(rng).max(0.0);
        let mut departure_rate_per_hour = self.traffic.departure_rate.sample(rng).max(0.0);
        let mut arrival_rate_per_hour = self.traffic.arrival_rate.sample(rng).max(0.0);

        match self.traffic.mode {
            TrafficMode::Mixed => {}
            TrafficMode::DeparturesOnly => arrival_rate_per_hour = 0.0,
            TrafficMode::ArrivalsOnly => departure_rate_per_hour = 0.0,
        }

        let env = Environment {
            weather,
            wind_direction_deg,
            wind_speed,
            departure_rate_per_hour,
            arrival_rate_per_hour,
        };
        trace!(?env, "environment sampled");
        env
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Concrete values of the stochastic parameters for a single tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub weather:                 Weather,
    /// Direction the wind blows FROM, [0, 360).
    pub wind_direction_deg:      f64,
    pub wind_speed:              f64,
    pub departure_rate_per_hour: f64,
    pub arrival_rate_per_hour:   f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            weather: Weather::Good,
            wind_direction_deg: 180.0,
            wind_speed: 0.0,
            departure_rate_per_hour: 0.0,
            arrival_rate_per_hour: 0.0,
        }
    }
}
