//! `MetricsCollector` — accumulates per-tick observables.
//!
//! Recording is a pure accumulation step: it never looks at the world, only
//! at the [`TickObservables`] the model step produced.  All derived
//! statistics are computed once, in [`MetricsCollector::summarize`].

use tracing::debug;

use gs_layout::Layout;
use gs_movement::{FlightRecord, TickObservables};
use gs_params::RunControl;

use crate::results::{FlightRow, Plot, PlotKind, ResultsDocument, Summary, round2};

/// Line plots never carry more points than this.
pub const MAX_PLOT_POINTS: usize = 500;

/// Histogram bins for the taxi-time distribution, at most.
const TAXI_TIME_BINS: usize = 20;

/// One row of the per-tick time series.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimeSample {
    pub time_secs:        f64,
    pub live:             u32,
    pub departures:       u32,
    pub arrivals:         u32,
    pub queued:           u32,
    pub runways_occupied: u32,
}

pub struct MetricsCollector {
    /// Node keys indexed by `NodeId`, for naming gates in flight rows.
    node_keys:         Vec<String>,
    time_step_secs:    f64,
    window_secs:       f64,
    pub(crate) series: Vec<TimeSample>,
    flights:           Vec<FlightRecord>,
    spawned:           u64,
    deferred:          u64,
    routing_failures:  u64,
    runway_entries:    u64,
}

impl MetricsCollector {
    pub fn new(layout: &Layout, run: &RunControl) -> Self {
        Self {
            node_keys: layout.nodes.iter().map(|n| n.key.clone()).collect(),
            time_step_secs: run.time_step_secs,
            window_secs: run.throughput_window_secs,
            series: Vec::new(),
            flights: Vec::new(),
            spawned: 0,
            deferred: 0,
            routing_failures: 0,
            runway_entries: 0,
        }
    }

    pub fn record(&mut self, obs: &TickObservables) {
        self.series.push(TimeSample {
            time_secs: obs.time_secs,
            live: obs.live() as u32,
            departures: obs.live_departures as u32,
            arrivals: obs.live_arrivals as u32,
            queued: obs.total_queued() as u32,
            runways_occupied: obs.runways_occupied as u32,
        });
        self.flights.extend(obs.completed.iter().cloned());
        self.spawned += u64::from(obs.spawned);
        self.deferred += u64::from(obs.deferred_spawns);
        self.routing_failures += u64::from(obs.routing_failures);
        self.runway_entries += obs.runway_entries() as u64;
    }

    pub fn ticks_recorded(&self) -> usize {
        self.series.len()
    }

    pub fn flights_recorded(&self) -> usize {
        self.flights.len()
    }

    pub fn time_series(&self) -> &[TimeSample] {
        &self.series
    }

    /// Build the results document for a run of `duration_secs`.
    pub fn summarize(&self, duration_secs: f64) -> ResultsDocument {
        debug!(
            ticks = self.series.len(),
            flights = self.flights.len(),
            duration_secs,
            "summarizing metrics"
        );
        ResultsDocument {
            summary: self.summary(duration_secs),
            plots: self.plots(),
            flights: self.flight_rows().into_iter().take(ResultsDocument::MAX_FLIGHTS).collect(),
        }
    }

    // ── Summary ───────────────────────────────────────────────────────────

    fn summary(&self, duration_secs: f64) -> Summary {
        let total = self.flights.len() as u64;
        let departures = self.flights.iter().filter(|f| f.movement.is_departure()).count() as u64;
        let durations: Vec<f64> = self.flights.iter().map(|f| f.duration_secs).collect();
        let taxi = |departure: Option<bool>| -> Vec<f64> {
            self.flights
                .iter()
                .filter(|f| departure.is_none_or(|d| f.movement.is_departure() == d))
                .map(FlightRecord::taxi_secs)
                .collect()
        };
        let waits: Vec<f64> = self.flights.iter().map(|f| f.wait_secs).collect();
        let queued: Vec<f64> = self.series.iter().map(|s| f64::from(s.queued)).collect();

        let throughput_per_hour =
            if duration_secs > 0.0 { total as f64 / (duration_secs / 3600.0) } else { 0.0 };

        Summary {
            total_flights: total,
            total_departures: departures,
            total_arrivals: total - departures,
            total_spawned: self.spawned,
            avg_duration: round2(mean(&durations)),
            min_duration: round2(durations.iter().copied().reduce(f64::min).unwrap_or(0.0)),
            max_duration: round2(max(&durations)),
            avg_taxi_time: round2(mean(&taxi(None))),
            avg_taxi_time_departure: round2(mean(&taxi(Some(true)))),
            avg_taxi_time_arrival: round2(mean(&taxi(Some(false)))),
            avg_wait_time: round2(mean(&waits)),
            max_wait_time: round2(max(&waits)),
            throughput_per_hour: round2(throughput_per_hour),
            avg_queue_length: round2(mean(&queued)),
            max_queue_length: self.series.iter().map(|s| u64::from(s.queued)).max().unwrap_or(0),
            deferred_spawns: self.deferred,
            routing_failures: self.routing_failures,
            runway_entries: self.runway_entries,
        }
    }

    // ── Plots ─────────────────────────────────────────────────────────────

    fn plots(&self) -> Vec<Plot> {
        let mut plots = Vec::new();
        if !self.series.is_empty() {
            plots.push(self.line("aircraft_count", "Aircraft on Ground", |s| s.live));
            plots.push(self.line("departures_on_ground", "Departures on Ground", |s| s.departures));
            plots.push(self.line("arrivals_on_ground", "Arrivals on Ground", |s| s.arrivals));
            plots.push(self.line("queue_length", "Hold Queue Length", |s| s.queued));
            plots.push(self.line("runways_occupied", "Runways Occupied", |s| s.runways_occupied));
        }
        if let Some(hist) = self.taxi_time_histogram() {
            plots.push(hist);
        }
        if let Some(hist) = self.throughput_histogram() {
            plots.push(hist);
        }
        plots
    }

    fn line(&self, id: &str, label: &str, value: impl Fn(&TimeSample) -> u32) -> Plot {
        let step = self.series.len().div_ceil(MAX_PLOT_POINTS).max(1);
        let points: Vec<&TimeSample> = self.series.iter().step_by(step).collect();
        Plot {
            id: id.to_owned(),
            kind: PlotKind::Line,
            label: label.to_owned(),
            x: points.iter().map(|s| round2(s.time_secs)).collect(),
            y: points.iter().map(|s| f64::from(value(s))).collect(),
        }
    }

    fn taxi_time_histogram(&self) -> Option<Plot> {
        let times: Vec<f64> = self.flights.iter().map(FlightRecord::taxi_secs).collect();
        let lo = times.iter().copied().reduce(f64::min)?;
        let hi = max(&times);

        let mut distinct = times.clone();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        let bins = distinct.len().min(TAXI_TIME_BINS).max(1);
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0u32; bins];
        for t in &times {
            let i = if width > 0.0 { (((t - lo) / width) as usize).min(bins - 1) } else { 0 };
            counts[i] += 1;
        }
        Some(Plot {
            id: "taxi_time_dist".to_owned(),
            kind: PlotKind::Histogram,
            label: "Taxi Time Distribution".to_owned(),
            x: (0..bins).map(|i| round2(lo + i as f64 * width)).collect(),
            y: counts.into_iter().map(f64::from).collect(),
        })
    }

    /// Completions per window, keyed by the start time of the completion tick.
    fn throughput_histogram(&self) -> Option<Plot> {
        if self.flights.is_empty() || self.window_secs <= 0.0 {
            return None;
        }
        let window_of = |f: &FlightRecord| {
            (f.completion_tick.0 as f64 * self.time_step_secs / self.window_secs) as usize
        };
        let last = self.flights.iter().map(window_of).max()?;
        let mut counts = vec![0u32; last + 1];
        for f in &self.flights {
            counts[window_of(f)] += 1;
        }
        Some(Plot {
            id: "throughput".to_owned(),
            kind: PlotKind::Histogram,
            label: "Runway Throughput per Window".to_owned(),
            x: (0..=last).map(|w| round2(w as f64 * self.window_secs)).collect(),
            y: counts.into_iter().map(f64::from).collect(),
        })
    }

    // ── Flights ───────────────────────────────────────────────────────────

    pub fn flight_rows(&self) -> Vec<FlightRow> {
        self.flights.iter().map(|f| self.flight_row(f)).collect()
    }

    fn flight_row(&self, f: &FlightRecord) -> FlightRow {
        let spawn_time = f.spawn_tick.0 as f64 * self.time_step_secs;
        FlightRow {
            id: f.id.0,
            movement: f.movement.to_string(),
            size: f.size.to_string(),
            gate: self.node_keys.get(f.gate.index()).cloned().unwrap_or_default(),
            spawn_time: round2(spawn_time),
            completion_time: round2(spawn_time + f.duration_secs),
            duration: round2(f.duration_secs),
            taxi_time: round2(f.taxi_secs()),
            wait_time: round2(f.wait_secs),
            distance: round2(f.distance),
            reroutes: f.reroutes,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}
