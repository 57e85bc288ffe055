//! Shared utilities for hoslog
//!
//! This crate provides:
//! - ID types (TripId)
//! - Duration helpers (hour/minute constructors, rounding for display)
//! - Error types
//! - Default paths for config and data directories

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
