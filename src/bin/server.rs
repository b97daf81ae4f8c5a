//! focusdb API server
//!
//! Run with: cargo run --bin focusdb-server
//!
//! # Configuration
//!
//! Config file (`$XDG_CONFIG_HOME/focusdb/config.toml` or
//! `./focusdb.toml`), overridable via environment:
//! - `FOCUSDB_PATH`: backing CSV file
//! - `FOCUSDB_HOST`: host to bind to (default: 0.0.0.0)
//! - `FOCUSDB_PORT`: port to listen on (default: 3000)
//! - `FOCUSDB_LOG`: log level
//! - `RUST_LOG`: full tracing filter (takes precedence)

use focusdb::api::{serve, AppState};
use focusdb::config::Config;
use focusdb::store::FocusStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "focusdb={},tower_http=debug",
                    config.logging.level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting focusdb server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backing file: {}", config.storage.path);

    let store = Arc::new(FocusStore::open(&config.storage.path)?);
    let stats = store.stats()?;
    tracing::info!("Store opened: {}", stats);

    let state = AppState::new(Arc::clone(&store), config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("focusdb server stopped");
    Ok(())
}
