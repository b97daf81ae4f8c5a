//! # focusdb
//!
//! Per-hour focus level tracker backed by a positional CSV record
//! store, with a minimal web UI and a CLI.
//!
//! The backing file holds one line per calendar day: the date prefix
//! followed by up to 24 comma-separated hourly fields. An in-memory
//! offset index maps each date to the byte where its record starts, so
//! lookups seek directly instead of scanning, and every length-changing
//! write propagates its byte delta through the index.
//!
//! ## Modules
//!
//! - [`store`]: the record store (offset index, line codec, engine)
//! - [`api`]: HTTP server with Axum (web UI + JSON endpoints)
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use focusdb::store::{FocusStore, Level};
//! use chrono::Local;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FocusStore::open("focus.csv")?;
//!
//!     let today = Local::now().date_naive();
//!     store.write_hour(today, 9, Level::Flow)?;
//!
//!     for (hour, level) in store.read_day(today)?.iter().enumerate() {
//!         println!("{hour:02}:00  {level}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;

// Re-export top-level types for convenience
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig};
pub use store::{FocusStore, Level, OffsetIndex, StoreError, StoreResult, StoreStats};

pub use api::{build_router, serve, ApiError, AppState};
