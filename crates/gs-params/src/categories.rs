//! Parameter categories.
//!
//! Every struct here implements `Default` with the values a run uses when the
//! parameter document is silent.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use gs_core::{Area, CoreError, SimRng, SizeClass, Weather};

use crate::value::{NumericParam, WeatherParam};

// ── Keyed triples ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerSize<T> {
    pub small:  T,
    pub medium: T,
    pub large:  T,
}

impl<T: Copy> PerSize<T> {
    #[inline]
    pub fn get(&self, size: SizeClass) -> T {
        match size {
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerArea<T> {
    pub runway:  T,
    pub taxiway: T,
    pub apron:   T,
}

impl<T: Copy> PerArea<T> {
    #[inline]
    pub fn get(&self, area: Area) -> T {
        match area {
            Area::Runway => self.runway,
            Area::Taxiway => self.taxiway,
            Area::Apron => self.apron,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerWeather<T> {
    pub good: T,
    pub mild: T,
    pub bad:  T,
}

impl<T: Copy> PerWeather<T> {
    #[inline]
    pub fn get(&self, weather: Weather) -> T {
        match weather {
            Weather::Good => self.good,
            Weather::Mild => self.mild,
            Weather::Bad => self.bad,
        }
    }
}

/// Relative weights of each size class among spawned aircraft.
pub type SizeMix = PerSize<f64>;

impl SizeMix {
    /// Draw a size class proportionally to the weights.
    pub fn sample(&self, rng: &mut SimRng) -> Option<SizeClass> {
        rng.choose_weighted(&[self.small, self.medium, self.large])
            .map(|i| SizeClass::ALL[i])
    }

    pub fn total(&self) -> f64 {
        self.small + self.medium + self.large
    }
}

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficMode {
    #[default]
    Mixed,
    DeparturesOnly,
    ArrivalsOnly,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityMode {
    #[default]
    Fifo,
    DepartFirst,
    ArriveFirst,
    Weighted,
    SizePriority,
}

impl PriorityMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PriorityMode::Fifo => "fifo",
            PriorityMode::DepartFirst => "depart_first",
            PriorityMode::ArriveFirst => "arrive_first",
            PriorityMode::Weighted => "weighted",
            PriorityMode::SizePriority => "size_priority",
        }
    }
}

impl fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityMode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "fifo" => Ok(PriorityMode::Fifo),
            "depart_first" => Ok(PriorityMode::DepartFirst),
            "arrive_first" => Ok(PriorityMode::ArriveFirst),
            "weighted" => Ok(PriorityMode::Weighted),
            "size_priority" => Ok(PriorityMode::SizePriority),
            _ => Err(CoreError::UnknownName { kind: "priority mode", value: s.to_owned() }),
        }
    }
}

impl FromStr for TrafficMode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "mixed" => Ok(TrafficMode::Mixed),
            "departures_only" => Ok(TrafficMode::DeparturesOnly),
            "arrivals_only" => Ok(TrafficMode::ArrivalsOnly),
            _ => Err(CoreError::UnknownName { kind: "traffic mode", value: s.to_owned() }),
        }
    }
}

// ── Categories ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficParams {
    pub mode:              TrafficMode,
    /// Departures per hour, airport-wide.
    pub departure_rate:    NumericParam,
    /// Arrivals per hour, airport-wide.
    pub arrival_rate:      NumericParam,
    pub departure_mix:     SizeMix,
    pub arrival_mix:       SizeMix,
    /// Apron group arrivals try first when picking a gate.
    pub apron_preference:  Option<String>,
    pub max_live_aircraft: u32,
}

impl Default for TrafficParams {
    fn default() -> Self {
        Self {
            mode: TrafficMode::Mixed,
            departure_rate: NumericParam::fixed(30.0),
            arrival_rate: NumericParam::fixed(18.0),
            departure_mix: SizeMix { small: 0.2, medium: 0.5, large: 0.3 },
            arrival_mix: SizeMix { small: 0.3, medium: 0.4, large: 0.3 },
            apron_preference: None,
            max_live_aircraft: 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentParams {
    pub weather:                  WeatherParam,
    /// Direction the wind blows FROM, compass degrees.
    pub wind_direction:           NumericParam,
    pub wind_speed:               NumericParam,
    /// Largest heading/wind difference a runway end may have and still be used.
    pub runway_heading_tolerance: f64,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            weather: WeatherParam::Fixed { value: Weather::Good },
            wind_direction: NumericParam::fixed(180.0),
            wind_speed: NumericParam::fixed(0.0),
            runway_heading_tolerance: 90.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
    /// Units per second before area and weather multipliers.
    pub base_speed:   PerSize<f64>,
    pub section:      PerArea<f64>,
    pub weather:      PerWeather<f64>,
    /// Largest speed gain per second, units per second squared.
    pub acceleration: f64,
    /// Amplitude of the per-tick speed perturbation, units per second.
    pub noise:        f64,
    /// Congestion reroutes allowed per aircraft.
    pub max_reroutes: u32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            base_speed: PerSize { small: 5.0, medium: 6.0, large: 4.0 },
            section: PerArea { runway: 1.0, taxiway: 0.8, apron: 0.5 },
            weather: PerWeather { good: 1.0, mild: 0.9, bad: 0.7 },
            acceleration: 2.0,
            noise: 0.5,
            max_reroutes: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeparationParams {
    pub base:    PerArea<f64>,
    pub weather: PerWeather<f64>,
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self {
            base: PerArea { runway: 100.0, taxiway: 50.0, apron: 30.0 },
            weather: PerWeather { good: 1.0, mild: 1.2, bad: 1.5 },
        }
    }
}

/// Coefficients of the `weighted` priority score.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub departure: f64,
    pub arrival:   f64,
    /// Multiplies the size rank (small 0, medium 1, large 2).
    pub size:      f64,
    /// Multiplies seconds spent in the queue.
    pub wait:      f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self { departure: 1.0, arrival: 2.0, size: 0.5, wait: 0.01 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityParams {
    /// Order in which a hold point releases its queue.
    pub hold_release: PriorityMode,
    /// Order among aircraft waiting at a boundary for the same runway lock.
    pub runway:       PriorityMode,
    pub weights:      PriorityWeights,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapacityParams {
    /// Seconds an arrival keeps its gate after reaching it.
    pub gate_turnaround_secs: f64,
    pub hold_queue_limit:     u32,
    /// Maximum simultaneously occupied gates per apron group.
    pub apron_limits:         BTreeMap<String, u32>,
}

impl Default for CapacityParams {
    fn default() -> Self {
        Self { gate_turnaround_secs: 600.0, hold_queue_limit: 20, apron_limits: BTreeMap::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessParams {
    /// Edge keys no aircraft may be routed over.
    pub closed_edges:        BTreeSet<String>,
    pub enforce_size_limits: bool,
}

impl Default for AccessParams {
    fn default() -> Self {
        Self { closed_edges: BTreeSet::new(), enforce_size_limits: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunControl {
    pub time_step_secs:         f64,
    pub duration_secs:          f64,
    pub seed:                   u64,
    /// Width of the throughput histogram bins.
    pub throughput_window_secs: f64,
}

impl Default for RunControl {
    fn default() -> Self {
        Self {
            time_step_secs: 1.0,
            duration_secs: 3600.0,
            seed: 42,
            throughput_window_secs: 300.0,
        }
    }
}
