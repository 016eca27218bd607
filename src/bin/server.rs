//! Scheduling HTTP Server Binary
//!
//! Entry point for the scheduling REST API: initializes the repository and
//! resource directory, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin schoolsched-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `SCHOOLSCHED_CONFIG`: Optional TOML repository config file
//! - `DIRECTORY_SEED`: Optional TOML seed file for the resource directory
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use schoolsched::db;
use schoolsched::directory::{ResourceDirectory, StaticDirectory};
use schoolsched::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting scheduling HTTP server");

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // Resource directory: seeded from file when configured, empty otherwise
    let directory: Arc<dyn ResourceDirectory> = match env::var("DIRECTORY_SEED") {
        Ok(path) => {
            let seeded = StaticDirectory::from_toml_path(std::path::Path::new(&path))?;
            info!("Resource directory seeded from {}", path);
            Arc::new(seeded)
        }
        Err(_) => Arc::new(StaticDirectory::new()),
    };

    // Create application state and router
    let state = AppState::new(repository, directory);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
