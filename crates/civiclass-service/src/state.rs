//! Shared application state

use civiclass_engine::ClassificationEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// State shared by all HTTP handlers
///
/// The engine is read-only after construction, so cloning the state is a
/// pair of cheap reference bumps.
#[derive(Clone)]
pub struct AppState {
    /// The classification engine, shared with the pipeline worker
    pub engine: Arc<ClassificationEngine>,

    /// Prometheus handle rendered by the metrics endpoint
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create application state
    pub fn new(engine: Arc<ClassificationEngine>, metrics: PrometheusHandle) -> Self {
        Self { engine, metrics }
    }
}
