use common::db::{CacheClient, DbPool};
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across all handlers
///
/// The pool and cache handles are owned here for the process lifetime so
/// future request handlers can reach them through the router state.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub cache: CacheClient,
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(db_pool: DbPool, cache: CacheClient, metrics: PrometheusHandle) -> Self {
        Self {
            db_pool,
            cache,
            metrics,
        }
    }
}
