//! Booky Server - Book Catalog Service
//!
//! Serves the catalog REST API over an in-memory store, optionally seeded
//! from a JSON file.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use booky_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::{memory::InMemoryStore, seed, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Must stay alive for the file writer to flush
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Booky Server v{}", env!("CARGO_PKG_VERSION"));

    let store = match &config.store.seed_path {
        Some(path) => InMemoryStore::from_snapshot(seed::load(path)?)?,
        None => InMemoryStore::new(),
    };
    let services = Services::new(Repository::new(Arc::new(store)));

    let violations = services.catalog.audit().await?;
    for violation in &violations {
        tracing::warn!("Seed catalog inconsistency: {}", violation);
    }
    if !violations.is_empty() {
        tracing::warn!(
            "Seed catalog has {} relationship inconsistencies",
            violations.len()
        );
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("booky_server={},tower_http=debug", logging.level).into());

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "booky-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    guard
}
