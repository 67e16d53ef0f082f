//! `gs-metrics` — turning per-tick observables into a results document.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`collector`] | `MetricsCollector` (pure accumulator), `TimeSample`       |
//! | [`results`]   | `ResultsDocument`, `Summary`, `Plot`, `FlightRow`         |
//! | [`export`]    | CSV export of flights and time series to any `io::Write`  |
//! | [`error`]     | `MetricsError`, `MetricsResult<T>`                        |
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut metrics = MetricsCollector::new(&layout, &params.run);
//! for obs in ticks {
//!     metrics.record(&obs);
//! }
//! let doc = metrics.summarize(params.run.duration_secs);
//! println!("{}", doc.to_json()?);
//! metrics.write_flights_csv(std::io::stdout())?;
//! ```

pub mod collector;
pub mod error;
pub mod export;
pub mod results;

#[cfg(test)]
mod tests;

pub use collector::{MetricsCollector, TimeSample};
pub use error::{MetricsError, MetricsResult};
pub use results::{FlightRow, Plot, PlotKind, ResultsDocument, Summary};
