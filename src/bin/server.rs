//! The HTTP server entry point: loads configuration, bulk-loads the
//! routing table, and serves the facade until the process receives a
//! shutdown signal.

use std::process;
use std::sync::Arc;

use log::{error, info};

use radix_route_store::config::Settings;
use radix_route_store::facade;
use radix_route_store::loader;
use radix_route_store::store::RouteStore;

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("configuration error: {err}");
            process::exit(1);
        }
    };

    let store = Arc::new(RouteStore::new(settings.max_metric, settings.cache_capacity));

    if let Err(err) = loader::load_routes(&store, &settings.routes_file) {
        error!("failed to load routing table: {err}");
        process::exit(1);
    }

    let app = facade::build_router(store);

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            process::exit(1);
        }
    };

    info!("listening on {addr}");
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
        process::exit(1);
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("shutdown signal received");
}
