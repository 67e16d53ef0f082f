//! Parameter document parsing.
//!
//! The document is a JSON object of category-prefixed keys:
//!
//! ```json
//! {
//!   "traffic.departure_rate": { "mode": "random", "min": 20, "max": 40 },
//!   "environment.weather": "mild",
//!   "priority.hold_release": "depart_first",
//!   "run.seed": 7
//! }
//! ```
//!
//! Nested objects are flattened first, so `{"run": {"seed": 7}}` means the
//! same as `{"run.seed": 7}`.  An object with a `"mode"` member is a value-kind
//! payload and is never flattened.
//!
//! Unknown keys are ignored, missing keys keep their current value,
//! out-of-range numbers are clamped, and anything of the wrong JSON type is
//! a `ParamsError::Invalid`.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, warn};

use gs_core::Weather;

use crate::categories::{PriorityMode, TrafficMode};
use crate::value::{NumericParam, WeatherParam};
use crate::{Parameters, ParamsError, ParamsResult};

// ── Entry points ──────────────────────────────────────────────────────────────

impl Parameters {
    /// Parse a complete document on top of the defaults (version 0).
    pub fn from_json(json: &str) -> ParamsResult<Parameters> {
        let doc: Value =
            serde_json::from_str(json).map_err(|e| ParamsError::Malformed(e.to_string()))?;
        Self::from_document(&doc)
    }

    pub fn from_document(doc: &Value) -> ParamsResult<Parameters> {
        apply_document(Parameters::default(), doc)
    }

    /// A new snapshot with `doc` applied on top of `self`, version + 1.
    pub fn updated(&self, doc: &Value) -> ParamsResult<Parameters> {
        let mut next = apply_document(self.clone(), doc)?;
        next.version = self.version + 1;
        Ok(next)
    }

    pub fn updated_from_json(&self, json: &str) -> ParamsResult<Parameters> {
        let doc: Value =
            serde_json::from_str(json).map_err(|e| ParamsError::Malformed(e.to_string()))?;
        self.updated(&doc)
    }

    /// Cross-parameter consistency checks.
    pub fn validate(&self) -> ParamsResult<()> {
        let t = &self.traffic;
        if t.departure_mix.total() <= 0.0 {
            return Err(ParamsError::Inconsistent("traffic.departure_mix sums to zero".into()));
        }
        if t.arrival_mix.total() <= 0.0 {
            return Err(ParamsError::Inconsistent("traffic.arrival_mix sums to zero".into()));
        }
        let w = &self.separation.weather;
        if !(w.good <= w.mild && w.mild <= w.bad && w.good < w.bad) {
            return Err(ParamsError::Inconsistent(format!(
                "separation.weather multipliers must grow with worse weather (good {}, mild {}, bad {})",
                w.good, w.mild, w.bad
            )));
        }
        Ok(())
    }
}

fn apply_document(mut params: Parameters, doc: &Value) -> ParamsResult<Parameters> {
    let Value::Object(_) = doc else {
        return Err(ParamsError::Malformed("document must be a JSON object".into()));
    };
    let mut flat = BTreeMap::new();
    flatten("", doc, &mut flat);
    for (key, value) in &flat {
        apply(&mut params, key, value)?;
    }
    params.validate()?;
    Ok(params)
}

/// Flatten nested objects into dotted keys, stopping at value-kind payloads.
pub fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) if prefix.is_empty() || !map.contains_key("mode") => {
            for (k, v) in map {
                let key = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                flatten(&key, v, out);
            }
        }
        _ => {
            out.insert(prefix.to_owned(), value.clone());
        }
    }
}

// ── Key table ─────────────────────────────────────────────────────────────────

const RATE: (f64, f64) = (0.0, 3600.0);
const MIX: (f64, f64) = (0.0, 1000.0);
const SPEED: (f64, f64) = (0.1, 200.0);
const MULTIPLIER: (f64, f64) = (0.01, 10.0);
const WEATHER_SPEED: (f64, f64) = (0.01, 2.0);
const SEPARATION: (f64, f64) = (0.0, 10_000.0);
const SEPARATION_WEATHER: (f64, f64) = (0.1, 10.0);
const WEIGHT: (f64, f64) = (-1000.0, 1000.0);

fn apply(p: &mut Parameters, key: &str, v: &Value) -> ParamsResult<()> {
    match key {
        // traffic
        "traffic.mode" => p.traffic.mode = named::<TrafficMode>(key, v)?,
        "traffic.departure_rate" => p.traffic.departure_rate = numeric_param(key, v, RATE)?,
        "traffic.arrival_rate" => p.traffic.arrival_rate = numeric_param(key, v, RATE)?,
        "traffic.departure_mix.small" => p.traffic.departure_mix.small = number(key, v, MIX)?,
        "traffic.departure_mix.medium" => p.traffic.departure_mix.medium = number(key, v, MIX)?,
        "traffic.departure_mix.large" => p.traffic.departure_mix.large = number(key, v, MIX)?,
        "traffic.arrival_mix.small" => p.traffic.arrival_mix.small = number(key, v, MIX)?,
        "traffic.arrival_mix.medium" => p.traffic.arrival_mix.medium = number(key, v, MIX)?,
        "traffic.arrival_mix.large" => p.traffic.arrival_mix.large = number(key, v, MIX)?,
        "traffic.apron_preference" => p.traffic.apron_preference = optional_string(key, v)?,
        "traffic.max_live_aircraft" => {
            p.traffic.max_live_aircraft = count(key, v, (1.0, 100_000.0))?
        }

        // environment
        "environment.weather" => p.environment.weather = weather_param(key, v)?,
        "environment.wind_direction" => {
            p.environment.wind_direction = numeric_param(key, v, (0.0, 360.0))?
        }
        "environment.wind_speed" => p.environment.wind_speed = numeric_param(key, v, (0.0, 200.0))?,
        "environment.runway_heading_tolerance" => {
            p.environment.runway_heading_tolerance = number(key, v, (0.0, 180.0))?
        }

        // movement
        "movement.speed.small" => p.movement.base_speed.small = number(key, v, SPEED)?,
        "movement.speed.medium" => p.movement.base_speed.medium = number(key, v, SPEED)?,
        "movement.speed.large" => p.movement.base_speed.large = number(key, v, SPEED)?,
        "movement.section.runway" => p.movement.section.runway = number(key, v, MULTIPLIER)?,
        "movement.section.taxiway" => p.movement.section.taxiway = number(key, v, MULTIPLIER)?,
        "movement.section.apron" => p.movement.section.apron = number(key, v, MULTIPLIER)?,
        "movement.weather.good" => p.movement.weather.good = number(key, v, WEATHER_SPEED)?,
        "movement.weather.mild" => p.movement.weather.mild = number(key, v, WEATHER_SPEED)?,
        "movement.weather.bad" => p.movement.weather.bad = number(key, v, WEATHER_SPEED)?,
        "movement.acceleration" => p.movement.acceleration = number(key, v, (0.01, 1000.0))?,
        "movement.noise" => p.movement.noise = number(key, v, (0.0, 50.0))?,
        "movement.max_reroutes" => p.movement.max_reroutes = count(key, v, (0.0, 100.0))?,

        // separation
        "separation.runway" => p.separation.base.runway = number(key, v, SEPARATION)?,
        "separation.taxiway" => p.separation.base.taxiway = number(key, v, SEPARATION)?,
        "separation.apron" => p.separation.base.apron = number(key, v, SEPARATION)?,
        "separation.weather.good" => p.separation.weather.good = number(key, v, SEPARATION_WEATHER)?,
        "separation.weather.mild" => p.separation.weather.mild = number(key, v, SEPARATION_WEATHER)?,
        "separation.weather.bad" => p.separation.weather.bad = number(key, v, SEPARATION_WEATHER)?,

        // priority
        "priority.hold_release" => p.priority.hold_release = named::<PriorityMode>(key, v)?,
        "priority.runway" => p.priority.runway = named::<PriorityMode>(key, v)?,
        "priority.weights.departure" => p.priority.weights.departure = number(key, v, WEIGHT)?,
        "priority.weights.arrival" => p.priority.weights.arrival = number(key, v, WEIGHT)?,
        "priority.weights.size" => p.priority.weights.size = number(key, v, WEIGHT)?,
        "priority.weights.wait" => p.priority.weights.wait = number(key, v, WEIGHT)?,

        // capacity
        "capacity.gate_turnaround" => {
            p.capacity.gate_turnaround_secs = number(key, v, (0.0, 86_400.0))?
        }
        "capacity.hold_queue_limit" => {
            p.capacity.hold_queue_limit = count(key, v, (1.0, 10_000.0))?
        }
        k if k.starts_with("capacity.apron.") => {
            let apron = &k["capacity.apron.".len()..];
            if v.is_null() {
                p.capacity.apron_limits.remove(apron);
            } else {
                let limit = count(key, v, (0.0, 10_000.0))?;
                p.capacity.apron_limits.insert(apron.to_owned(), limit);
            }
        }

        // access
        "access.closed_edges" => {
            let Value::Array(items) = v else {
                return Err(ParamsError::invalid(key, "expected an array of edge ids"));
            };
            let mut closed = std::collections::BTreeSet::new();
            for item in items {
                let id = item
                    .as_str()
                    .ok_or_else(|| ParamsError::invalid(key, "edge ids must be strings"))?;
                closed.insert(id.to_owned());
            }
            p.access.closed_edges = closed;
        }
        "access.enforce_size_limits" => {
            p.access.enforce_size_limits =
                v.as_bool().ok_or_else(|| ParamsError::invalid(key, "expected a boolean"))?
        }

        // run control
        "run.time_step" => p.run.time_step_secs = number(key, v, (0.01, 3600.0))?,
        "run.duration" => p.run.duration_secs = number(key, v, (0.0, 604_800.0))?,
        "run.seed" => p.run.seed = seed(key, v)?,
        "run.throughput_window" => {
            p.run.throughput_window_secs = number(key, v, (1.0, 86_400.0))?
        }

        _ => debug!(key, "ignoring unknown parameter"),
    }
    Ok(())
}

// ── Value readers ─────────────────────────────────────────────────────────────

fn clamp_logged(key: &str, x: f64, (lo, hi): (f64, f64)) -> f64 {
    let clamped = x.clamp(lo, hi);
    if clamped != x {
        warn!(key, value = x, clamped, "parameter out of range; clamped");
    }
    clamped
}

fn number(key: &str, v: &Value, bounds: (f64, f64)) -> ParamsResult<f64> {
    let x = v
        .as_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| ParamsError::invalid(key, format!("expected a number, got {v}")))?;
    Ok(clamp_logged(key, x, bounds))
}

fn count(key: &str, v: &Value, bounds: (f64, f64)) -> ParamsResult<u32> {
    Ok(number(key, v, bounds)?.round() as u32)
}

fn seed(key: &str, v: &Value) -> ParamsResult<u64> {
    v.as_u64().ok_or_else(|| ParamsError::invalid(key, "expected a non-negative integer"))
}

fn named<T>(key: &str, v: &Value) -> ParamsResult<T>
where
    T: FromStr<Err = gs_core::CoreError>,
{
    let s = v.as_str().ok_or_else(|| ParamsError::invalid(key, "expected a string"))?;
    s.parse::<T>().map_err(|e| ParamsError::invalid(key, e.to_string()))
}

fn optional_string(key: &str, v: &Value) -> ParamsResult<Option<String>> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ParamsError::invalid(key, "expected a string or null")),
    }
}

fn numeric_param(key: &str, v: &Value, (lo, hi): (f64, f64)) -> ParamsResult<NumericParam> {
    let mut param = match v {
        Value::Number(_) => NumericParam::fixed(number(key, v, (f64::MIN, f64::MAX))?),
        Value::Object(_) => serde_json::from_value::<NumericParam>(v.clone())
            .map_err(|e| ParamsError::invalid(key, e.to_string()))?,
        _ => return Err(ParamsError::invalid(key, "expected a number or a mode object")),
    };
    if param.clamp_into(lo, hi) {
        warn!(key, ?param, "parameter out of range; clamped");
    }
    Ok(param)
}

fn weather_param(key: &str, v: &Value) -> ParamsResult<WeatherParam> {
    match v {
        Value::String(_) => Ok(WeatherParam::Fixed { value: named::<Weather>(key, v)? }),
        Value::Object(_) => serde_json::from_value::<WeatherParam>(v.clone())
            .map_err(|e| ParamsError::invalid(key, e.to_string())),
        _ => Err(ParamsError::invalid(key, "expected a weather name or a mode object")),
    }
}
