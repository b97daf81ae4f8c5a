//! Focusdb record store
//!
//! This module provides the positional record store at the core of
//! focusdb:
//!
//! - **level**: the per-hour `Level` ordinal and its decimal codec
//! - **record**: the one-line-per-day format and all byte arithmetic
//! - **index**: in-memory date → byte-offset map with shift propagation
//! - **engine**: the `FocusStore` owning the file handle and the index
//! - **error**: error types
//!
//! # Architecture
//!
//! ```text
//! Read Path:
//!   date → OffsetIndex → seek → parse line → [Level; 24]
//!
//! Write Path:
//!   (date, hour, level) → OffsetIndex → seek
//!     same-width value  → overwrite field bytes in place
//!     width changes     → rewrite line, shift file tail, update index
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use focusdb::store::{FocusStore, Level};
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FocusStore::open("focus.csv")?;
//!
//!     let date = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
//!     store.write_hour(date, 9, Level::Flow)?;
//!
//!     let day = store.read_day(date)?;
//!     println!("09:00 was {}", day[9]);
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod level;
pub mod record;

// Re-export commonly used types
pub use engine::{FocusStore, StoreStats};
pub use error::{StoreError, StoreResult};
pub use index::OffsetIndex;
pub use level::Level;
pub use record::{Record, DATE_FORMAT, HOURS_PER_DAY};
