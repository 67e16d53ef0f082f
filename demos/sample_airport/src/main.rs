//! sample_airport — a two-hour run on a small single-runway field.
//!
//! Usage: `sample_airport [LAYOUT.json [PARAMS.json]]`.  Without arguments the
//! embedded documents under `data/` are used.  Halfway through the run the
//! middle apron taxiway is closed to show a between-tick parameter update.
//!
//! Log level comes from `RUST_LOG` (default `info`).

use std::fs::{self, File};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gs_core::Tick;
use gs_layout::Layout;
use gs_metrics::ResultsDocument;
use gs_movement::TickObservables;
use gs_params::Parameters;
use gs_sim::{ParameterSchedule, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const LAYOUT_JSON: &str = include_str!("../data/layout.json");
const PARAMS_JSON: &str = include_str!("../data/params.json");

const OUTPUT_DIR:        &str = "output/sample_airport";
const PROGRESS_INTERVAL: u64  = 600; // ticks

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    peak_live:   usize,
    peak_queue:  usize,
    warnings:    usize,
}

impl SimObserver for Progress {
    fn on_tick_end(&mut self, obs: &TickObservables) {
        self.peak_live = self.peak_live.max(obs.live());
        self.peak_queue = self.peak_queue.max(obs.total_queued());
        self.warnings += obs.warnings.len();
        if obs.tick.0.is_multiple_of(PROGRESS_INTERVAL) {
            info!(
                tick = obs.tick.0,
                departures = obs.live_departures,
                arrivals = obs.live_arrivals,
                queued = obs.total_queued(),
                "progress"
            );
        }
    }

    fn on_parameters_replaced(&mut self, tick: Tick, params: &Parameters) {
        info!(tick = tick.0, version = params.version, "new parameters in effect");
    }

    fn on_sim_end(&mut self, final_tick: Tick, results: &ResultsDocument) {
        info!(ticks = final_tick.0, flights = results.summary.total_flights, "finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let layout_json = match args.first() {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => LAYOUT_JSON.to_owned(),
    };
    let params_json = match args.get(1) {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => PARAMS_JSON.to_owned(),
    };

    // 1. Load and validate both documents.
    let layout = Layout::from_json(&layout_json).context("loading layout")?;
    let params = Parameters::from_json(&params_json).context("loading parameters")?;
    println!("=== sample_airport — ground movement simulation ===");
    println!(
        "Layout: {} nodes, {} edges, {} gates  |  Seed: {}  |  Duration: {} s",
        layout.node_count(),
        layout.edge_count(),
        layout.gates().count(),
        params.run.seed,
        params.run.duration_secs,
    );

    // 2. Close the middle taxiway for the second half of the run.
    let half = Tick(params.total_ticks() / 2);
    let schedule = ParameterSchedule::new().document_at(half, json!({ "access.closed_edges": ["TW2"] }));

    // 3. Build and run.
    let mut sim = SimBuilder::new(layout, params).build()?;
    let mut progress = Progress::default();
    let t0 = Instant::now();
    let results = sim.run_with_schedule(&mut progress, schedule)?;
    let elapsed = t0.elapsed();

    // 4. Write results.
    let dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(dir)?;
    fs::write(dir.join("results.json"), results.to_json()?)?;
    sim.metrics.write_flights_csv(File::create(dir.join("flights.csv"))?)?;
    sim.metrics.write_time_series_csv(File::create(dir.join("time_series.csv"))?)?;

    // 5. Summary.
    let s = &results.summary;
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  flights      : {} ({} departures, {} arrivals)", s.total_flights, s.total_departures, s.total_arrivals);
    println!("  spawned      : {}  (deferred attempts: {}, routing failures: {})", s.total_spawned, s.deferred_spawns, s.routing_failures);
    println!("  taxi time    : avg {:.1} s (dep {:.1}, arr {:.1})", s.avg_taxi_time, s.avg_taxi_time_departure, s.avg_taxi_time_arrival);
    println!("  wait time    : avg {:.1} s, max {:.1} s", s.avg_wait_time, s.max_wait_time);
    println!("  throughput   : {:.2} / h", s.throughput_per_hour);
    println!("  peak on grnd : {}  |  peak queue: {}  |  warnings: {}", progress.peak_live, progress.peak_queue, progress.warnings);
    println!("  output       : {OUTPUT_DIR}/{{results.json, flights.csv, time_series.csv}}");

    Ok(())
}
