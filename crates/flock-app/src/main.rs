use std::sync::Arc;

use flock_app::app::api::routes;
use flock_app::state::Inject;
use flock_core::clock::Clock;
use flock_core::config::load_config;
use flock_service::store::InMemoryStore;
use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router, Server};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting flock server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let clock: Arc<dyn Clock> = Arc::new(config.calendar.clock()?);
    let store = Arc::new(InMemoryStore::new());
    if let Some(path) = &config.seed.events_path {
        let seeded = store.seed_events_from_path(path)?;
        tracing::info!(seeded, path = %path.display(), "Seed events loaded");
    }

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(Inject(store))
        .hoop(Inject(clock))
        .hoop(Inject(Arc::new(config)))
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    let server = Server::new(acceptor);
    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown requested");
        handle.stop_graceful(None);
    });
    server.serve(router).await;

    Ok(())
}
