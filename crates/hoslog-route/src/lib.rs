//! Routing for hoslog
//!
//! Turns location names into coordinates and asks a directions service how
//! long the drive between them takes. The planner only needs the duration;
//! the instructions and geometry are passed through to the caller.

mod error;
mod geocode;
mod ors;
mod provider;

pub use error::*;
pub use geocode::*;
pub use ors::*;
pub use provider::*;
