//! hoslog trip service
//!
//! Wires the pieces together for a single trip request:
//! - Request validation
//! - Geocoding and route lookup
//! - Duty planning
//! - Persistence and audit

mod service;

pub use service::*;
