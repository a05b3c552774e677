use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};

use maintenance_crons::config::ServerConfig;
use maintenance_crons::core::CronJob;
use maintenance_crons::handlers::{routes, CronContext};

#[tokio::main]
async fn main() {
    // Initialize env
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("No .env file loaded: {}", e),
    };

    // Load config from the environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: host={}, port={}, store={}",
        config.host, config.port, config.store.url
    );

    let ctx = Arc::new(CronContext::from_config(&config));

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received");
    };

    let (bound, server) =
        match warp::serve(routes(ctx)).try_bind_with_graceful_shutdown(addr, shutdown) {
            Ok(bound) => bound,
            Err(e) => {
                error!("Failed to bind {}: {}", addr, e);
                std::process::exit(1);
            }
        };

    info!("Starting maintenance cron server on {}", bound);
    for job in CronJob::ALL {
        info!("  GET /api/cron/{}", job.slug());
    }

    server.await;
    info!("Server stopped");
}
