use std::sync::Arc;

use crate::collections::DocumentStore;
use crate::config::Config;
use crate::mock_api::MockApi;
use crate::mock_data::MockDataService;
use crate::session::SessionContext;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Mutable in-memory tables behind simulated latency.
    pub api: Arc<MockApi>,
    /// Read-only fixture API.
    pub data: Arc<MockDataService>,
    /// Pluggable document store. Default: InMemoryDocumentStore.
    pub store: Arc<dyn DocumentStore>,
    pub session: Arc<SessionContext>,
    pub config: Config,
}
