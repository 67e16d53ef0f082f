//! Engine entry points for callers that do not need a custom model or router.

use gs_layout::Layout;
use gs_metrics::ResultsDocument;
use gs_movement::TaxiModel;
use gs_params::Parameters;
use gs_routing::DijkstraRouter;

use crate::{NoopObserver, Sim, SimBuilder, SimResult};

/// Build a ready-to-advance world with the default model and router.
///
/// Drive it tick by tick with [`Sim::advance`] for live progress, or call
/// [`Sim::run`].
pub fn init_run(layout: Layout, params: Parameters) -> SimResult<Sim<TaxiModel, DijkstraRouter>> {
    SimBuilder::new(layout, params).build()
}

/// Run a whole simulation and return its results document.
pub fn run_to_completion(layout: Layout, params: Parameters) -> SimResult<ResultsDocument> {
    let mut sim = init_run(layout, params)?;
    Ok(sim.run(&mut NoopObserver))
}

/// [`run_to_completion`] from the layout and parameter JSON documents.
pub fn run_documents(layout_json: &str, params_json: &str) -> SimResult<ResultsDocument> {
    let layout = Layout::from_json(layout_json)?;
    let params = Parameters::from_json(params_json)?;
    run_to_completion(layout, params)
}
