use gs_layout::LayoutError;
use gs_metrics::MetricsError;
use gs_params::ParamsError;
use thiserror::Error;

/// Errors that can escape the runner.  Everything that happens inside a
/// tick degrades to backpressure instead.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("results output error: {0}")]
    Metrics(#[from] MetricsError),
}

pub type SimResult<T> = Result<T, SimError>;
