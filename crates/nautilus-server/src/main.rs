mod config;
mod telemetry;

use std::sync::Arc;

use nautilus_api::ApiState;
use nautilus_domain::ReadingStore;
use nautilus_mongo::{MongoConfig, MongoReadingStore, MongoStore};
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&config.log_level) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!(
        database = %config.database_name,
        "starting nautilus telemetry intake service"
    );

    let store = Arc::new(MongoStore::new(MongoConfig {
        url: config.mongodb_url.clone(),
        database: config.database_name.clone(),
        connect_timeout_secs: config.connect_timeout_secs,
    }));

    // A store outage at startup is not fatal. The service comes up in
    // degraded mode and reports partial_success until the database returns.
    if !store.connect().await {
        warn!("could not reach MongoDB at startup, accepting data without persistence");
    }

    let reading_store: Arc<dyn ReadingStore> = Arc::new(MongoReadingStore::new(store.clone()));
    let state = ApiState::new(reading_store, config.database_name.clone());
    let app = nautilus_api::router(state);

    let addr = format!("{}:{}", config.http_host, config.http_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "listening for telemetry");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
    }

    store.close().await;
    info!("shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
