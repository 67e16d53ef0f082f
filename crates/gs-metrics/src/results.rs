//! The results document: `{summary, plots, flights}`.

use serde::{Deserialize, Serialize};

use crate::MetricsResult;

/// Aggregate statistics of a run.  Times are seconds, rounded to 2 decimals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_flights:           u64,
    pub total_departures:        u64,
    pub total_arrivals:          u64,
    pub total_spawned:           u64,
    pub avg_duration:            f64,
    pub min_duration:            f64,
    pub max_duration:            f64,
    pub avg_taxi_time:           f64,
    pub avg_taxi_time_departure: f64,
    pub avg_taxi_time_arrival:   f64,
    pub avg_wait_time:           f64,
    pub max_wait_time:           f64,
    pub throughput_per_hour:     f64,
    pub avg_queue_length:        f64,
    pub max_queue_length:        u64,
    pub deferred_spawns:         u64,
    pub routing_failures:        u64,
    pub runway_entries:          u64,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Line,
    Histogram,
}

/// One chart's worth of data.  For histograms `x` holds bin starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id:    String,
    #[serde(rename = "type")]
    pub kind:  PlotKind,
    pub label: String,
    pub x:     Vec<f64>,
    pub y:     Vec<f64>,
}

/// One completed flight as it appears in the results document and the
/// flights CSV.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightRow {
    pub id:              u32,
    #[serde(rename = "type")]
    pub movement:        String,
    #[serde(rename = "class")]
    pub size:            String,
    pub gate:            String,
    pub spawn_time:      f64,
    pub completion_time: f64,
    pub duration:        f64,
    pub taxi_time:       f64,
    pub wait_time:       f64,
    pub distance:        f64,
    pub reroutes:        u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub summary: Summary,
    pub plots:   Vec<Plot>,
    /// The first [`ResultsDocument::MAX_FLIGHTS`] completed flights.
    pub flights: Vec<FlightRow>,
}

impl ResultsDocument {
    pub const MAX_FLIGHTS: usize = 100;

    pub fn to_json(&self) -> MetricsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> MetricsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn plot(&self, id: &str) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id == id)
    }
}

#[inline]
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
