//! Wayfarer Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use wayfarer_engine::api;
use wayfarer_engine::infrastructure::{
    config::{CredentialTier, CronConfig},
    logging::{init_logging, load_dotenv_from_repo_root, log_directives},
    ports::{TableStore, WorldSimulationPort},
    rest_store::RestStore,
    simulation::{HttpWorldSimulation, UnconfiguredSimulation},
};
use wayfarer_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the server may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    init_logging(&log_directives("debug", true), false);

    tracing::info!("Starting Wayfarer Engine");

    // Load configuration
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);

    // The store client must exist before anything is served.
    let store = RestStore::from_env(CredentialTier::Service)?;
    tracing::info!(tier = %store.tier(), "World store client configured");
    let store: Arc<dyn TableStore> = Arc::new(store);

    let cron = CronConfig::from_env()?;
    let simulation: Arc<dyn WorldSimulationPort> = match cron.simulation_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "World simulation configured");
            Arc::new(HttpWorldSimulation::new(url)?)
        }
        None => {
            tracing::warn!("WORLD_SIMULATION_URL not set, daily update will fail");
            Arc::new(UnconfiguredSimulation)
        }
    };
    if cron.secret.is_none() {
        tracing::warn!("CRON_SECRET not set, daily update route is open");
    }

    // Create application
    let app = Arc::new(App::new(store, simulation, cron.secret));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
