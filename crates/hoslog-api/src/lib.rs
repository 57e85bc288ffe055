//! Shared types for hoslog
//!
//! This crate defines the stable shapes exchanged between the planner core,
//! the store and the command line:
//! - Duty statuses and rendered log entries
//! - Plan outcomes and trip logs
//! - Trip requests (with validation) and responses
//! - Daily sheet views

mod request;
mod sheet;
mod types;

pub use request::*;
pub use sheet::*;
pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
