//! API route handlers
//!
//! Each submodule handles one group of related endpoints:
//! - `day`: the focus page and the day/hour data endpoints
//! - `health`: health checks

pub mod day;
pub mod health;
