pub mod api;
pub mod config;
pub mod errors;
pub mod intelligence;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::intelligence::ModelBundle;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Shared by every request; never mutated after start-up.
    pub bundle: Arc<ModelBundle>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
