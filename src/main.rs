//! Parrot server binary.
//!
//! Binds 0.0.0.0:3001 with the built-in reflection routes and serves until
//! the process is interrupted.

use parrot::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting parrot server...");

    let config = ParrotConfig::new();
    let router = parrot::routes::router();

    tracing::info!("Routes: GET /, GET /something, POST /something");
    tracing::info!("Try: curl http://localhost:3001/");
    tracing::info!("Try: curl 'http://localhost:3001/something?json=true&a=1&a=2'");
    tracing::info!("Try: curl -X POST -d '{{\"x\":1}}' http://localhost:3001/something");

    ParrotServer::new(config, router).run().await
}
