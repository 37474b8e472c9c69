mod collections;
mod config;
mod errors;
mod mock_api;
mod mock_data;
mod models;
mod routes;
mod session;
mod state;
mod stats;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::collections::InMemoryDocumentStore;
use crate::config::Config;
use crate::mock_api::{MockApi, NetworkProfile, NetworkSimulator};
use crate::mock_data::{FixtureSource, Fixtures, MockDataService};
use crate::routes::build_router;
use crate::session::{LocalStorage, SessionContext};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tracker API v{}", env!("CARGO_PKG_VERSION"));

    let profile = NetworkProfile::from_config(&config);
    info!(
        "Mock network: {}-{}ms latency, {:.0}% failure rate",
        profile.min_latency.as_millis(),
        profile.max_latency.as_millis(),
        profile.failure_rate * 100.0
    );

    // Seed the mock API from the same fixtures the data service serves
    let source = FixtureSource::from_dir(config.fixtures_dir.clone());
    let seed = Fixtures::load(&source)
        .await
        .context("Failed to load seed fixtures")?;
    let api = MockApi::new(seed, simulator(profile, config.mock_seed));
    // offset so the two services do not draw identical sequences
    let data = MockDataService::new(
        source,
        simulator(profile, config.mock_seed.map(|s| s.wrapping_add(1))),
    );

    // Restore auth and theme from local storage
    let storage = LocalStorage::open(&config.local_storage_path)
        .await
        .context("Failed to open local storage")?;
    let session = SessionContext::restore(Arc::new(storage)).await;

    let state = AppState {
        api: Arc::new(api),
        data: Arc::new(data),
        store: Arc::new(InMemoryDocumentStore::new()),
        session: Arc::new(session),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn simulator(profile: NetworkProfile, seed: Option<u64>) -> NetworkSimulator {
    match seed {
        Some(seed) => NetworkSimulator::seeded(profile, seed),
        None => NetworkSimulator::new(profile),
    }
}
