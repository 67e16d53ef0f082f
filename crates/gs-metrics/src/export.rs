//! CSV export.
//!
//! Two tables, each written with a header row to any `io::Write`:
//! - flights: one row per completed flight (every flight, not just the
//!   first [`ResultsDocument::MAX_FLIGHTS`](crate::ResultsDocument::MAX_FLIGHTS))
//! - time series: one row per recorded tick

use std::io;

use csv::Writer;

use crate::{MetricsCollector, MetricsResult};

const FLIGHT_HEADER: [&str; 11] = [
    "id",
    "type",
    "class",
    "gate",
    "spawn_time",
    "completion_time",
    "duration",
    "taxi_time",
    "wait_time",
    "distance",
    "reroutes",
];

const SERIES_HEADER: [&str; 6] =
    ["time_secs", "aircraft", "departures", "arrivals", "queued", "runways_occupied"];

impl MetricsCollector {
    pub fn write_flights_csv<W: io::Write>(&self, w: W) -> MetricsResult<()> {
        let mut out = Writer::from_writer(w);
        out.write_record(FLIGHT_HEADER)?;
        for row in self.flight_rows() {
            out.write_record(&[
                row.id.to_string(),
                row.movement,
                row.size,
                row.gate,
                row.spawn_time.to_string(),
                row.completion_time.to_string(),
                row.duration.to_string(),
                row.taxi_time.to_string(),
                row.wait_time.to_string(),
                row.distance.to_string(),
                row.reroutes.to_string(),
            ])?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn write_time_series_csv<W: io::Write>(&self, w: W) -> MetricsResult<()> {
        let mut out = Writer::from_writer(w);
        out.write_record(SERIES_HEADER)?;
        for s in self.time_series() {
            out.write_record(&[
                s.time_secs.to_string(),
                s.live.to_string(),
                s.departures.to_string(),
                s.arrivals.to_string(),
                s.queued.to_string(),
                s.runways_occupied.to_string(),
            ])?;
        }
        out.flush()?;
        Ok(())
    }
}
