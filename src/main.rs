use crate::{
    config::{load_config, VERSION},
    services::Services,
    utils::logging,
};
use log::{error, info};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};

mod config;
mod middleware;
mod routes;
mod services;
mod utils;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = load_config().unwrap_or_default();

    // Initialize logging
    logging::setup(config.logging, &config.logging_dir);

    info!("Starting Quiz Ranking v{}", VERSION);

    let services = Arc::new(Services::init(&config));
    info!(
        "Ranking file: {}",
        services.ranking.store().path().display()
    );

    let router = routes::router(services, &config);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = match TcpListener::bind(addr).await {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to bind HTTP server on {}: {:?}", addr, err);
            return Err(err);
        }
    };

    info!("Started HTTP server on {}", addr);
    logging::log_connection_urls(config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            _ = signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await
}
