//! Hours-of-service duty planner for hoslog
//!
//! This crate is the heart of hoslog, containing:
//! - The duty clock (daily, cycle, break and fuel counters)
//! - The segment scheduler (drive / fuel / break / reset / restart decisions)
//! - The log compiler (24-hour day padding, adjacent segment merging)
//! - Daily sheet layout for display
//!
//! Everything here is pure and synchronous; a planning run owns all of its
//! state and touches no I/O.

mod clock;
mod compiler;
mod planner;
mod scheduler;
mod segment;
mod sheet;

pub use clock::*;
pub use compiler::*;
pub use planner::*;
pub use scheduler::*;
pub use segment::*;
pub use sheet::*;
