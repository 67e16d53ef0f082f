//! Per-parameter value kinds.
//!
//! Stochastic parameters are tagged variants carrying their own payload and
//! are resolved to a concrete value once per tick by [`Sample::sample`],
//! driven by the run's seeded environment stream.
//!
//! | Document `mode` | Numeric payload          | Weather payload                  |
//! |-----------------|--------------------------|----------------------------------|
//! | `fixed`         | `value`                  | `value`                          |
//! | `random`        | `min`, `max` (uniform)   | `choices` (uniform pick)         |
//! | `realistic`     | `min`, `peak`, `max`     | `weights` {good, mild, bad}      |
//!
//! "Realistic" numerics follow a triangular distribution peaking at `peak`,
//! sampled by inverse CDF.

use serde::{Deserialize, Serialize};

use gs_core::{SimRng, Weather};

/// Resolve a parameter to a concrete value for one tick.
pub trait Sample {
    type Output;
    fn sample(&self, rng: &mut SimRng) -> Self::Output;
}

// ── NumericParam ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NumericParam {
    Fixed { value: f64 },
    #[serde(rename = "random")]
    Uniform { min: f64, max: f64 },
    Realistic { min: f64, peak: f64, max: f64 },
}

impl NumericParam {
    pub fn fixed(value: f64) -> Self {
        NumericParam::Fixed { value }
    }

    /// Mean of the distribution, used for reporting and for `is_zero` checks.
    pub fn mean(&self) -> f64 {
        match *self {
            NumericParam::Fixed { value } => value,
            NumericParam::Uniform { min, max } => (min + max) / 2.0,
            NumericParam::Realistic { min, peak, max } => (min + peak + max) / 3.0,
        }
    }

    /// `true` if every possible draw is zero or less.
    pub fn never_positive(&self) -> bool {
        match *self {
            NumericParam::Fixed { value } => value <= 0.0,
            NumericParam::Uniform { max, .. } | NumericParam::Realistic { max, .. } => max <= 0.0,
        }
    }

    /// Clamp every component into `[lo, hi]` and order the bounds.
    /// Returns `true` if anything changed.
    pub(crate) fn clamp_into(&mut self, lo: f64, hi: f64) -> bool {
        let before = self.clone();
        match self {
            NumericParam::Fixed { value } => *value = value.clamp(lo, hi),
            NumericParam::Uniform { min, max } => {
                *min = min.clamp(lo, hi);
                *max = max.clamp(lo, hi);
                if *min > *max {
                    std::mem::swap(min, max);
                }
            }
            NumericParam::Realistic { min, peak, max } => {
                *min = min.clamp(lo, hi);
                *max = max.clamp(lo, hi);
                if *min > *max {
                    std::mem::swap(min, max);
                }
                *peak = peak.clamp(*min, *max);
            }
        }
        *self != before
    }
}

impl Sample for NumericParam {
    type Output = f64;

    fn sample(&self, rng: &mut SimRng) -> f64 {
        match *self {
            NumericParam::Fixed { value } => value,
            NumericParam::Uniform { min, max } => {
                if max > min { rng.gen_range(min..=max) } else { min }
            }
            NumericParam::Realistic { min, peak, max } => {
                triangular(min, peak, max, rng.random::<f64>())
            }
        }
    }
}

/// Inverse CDF of the triangular distribution at `u` ∈ [0, 1).
pub(crate) fn triangular(min: f64, peak: f64, max: f64, u: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    let split = (peak - min) / span;
    if u < split {
        min + (u * span * (peak - min)).sqrt()
    } else {
        max - ((1.0 - u) * span * (max - peak)).sqrt()
    }
}

// ── WeatherParam ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WeatherParam {
    Fixed { value: Weather },
    #[serde(rename = "random")]
    Choice { choices: Vec<Weather> },
    #[serde(rename = "realistic")]
    Weighted { weights: WeatherWeights },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherWeights {
    #[serde(default)]
    pub good: f64,
    #[serde(default)]
    pub mild: f64,
    #[serde(default)]
    pub bad:  f64,
}

impl Default for WeatherWeights {
    fn default() -> Self {
        Self { good: 0.7, mild: 0.2, bad: 0.1 }
    }
}

impl Sample for WeatherParam {
    type Output = Weather;

    fn sample(&self, rng: &mut SimRng) -> Weather {
        match self {
            WeatherParam::Fixed { value } => *value,
            WeatherParam::Choice { choices } => {
                if choices.is_empty() {
                    return Weather::Good;
                }
                choices[rng.gen_range(0..choices.len())]
            }
            WeatherParam::Weighted { weights } => {
                match rng.choose_weighted(&[weights.good, weights.mild, weights.bad]) {
                    Some(1) => Weather::Mild,
                    Some(2) => Weather::Bad,
                    _ => Weather::Good,
                }
            }
        }
    }
}
