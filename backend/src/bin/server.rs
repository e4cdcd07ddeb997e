//! CCH Dashboard HTTP Server Binary
//!
//! This is the main entry point for the dashboard server.
//! It loads the configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve CCH1.0.xlsx from the working directory
//! cargo run --bin cch-server
//!
//! # Point at another workbook
//! CCH_DATA_PATH=/srv/data/rooms.xlsx cargo run --bin cch-server
//! ```
//!
//! # Environment Variables
//!
//! - `CCH_CONFIG`: Path to a `dashboard.toml` (default: searched for)
//! - `CCH_DATA_PATH`, `CCH_SHEET`, `CCH_LOGO_PATH`: Source and logo overrides
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cch_dashboard::config::DashboardConfig;
use cch_dashboard::http::{create_router, AppState};

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
        .with_thread_ids(true)
        .init();

    info!("Starting CCH Dashboard server");

    let config = DashboardConfig::load()?;
    info!(
        "Data source: {} (sheet '{}', columns {}, max {} rows)",
        config.source.path.display(),
        config.source.sheet,
        config.source.columns,
        config.source.max_rows
    );
    if !config.source.path.is_file() {
        warn!(
            "Workbook {} does not exist yet; the Home page will show a load error",
            config.source.path.display()
        );
    }
    if !config.site.logo_path.is_file() {
        warn!("Logo {} not found; pages render without it", config.site.logo_path.display());
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config);

    // Create router with all endpoints
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
