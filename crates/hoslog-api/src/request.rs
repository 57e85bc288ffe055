//! Trip planning requests

use hoslog_util::{HoslogError, Result};
use serde::{Deserialize, Serialize};

/// Longest accepted location name
pub const MAX_LOCATION_LEN: usize = 255;

/// Cycle budget used when validating without an explicit limit
pub const DEFAULT_CYCLE_LIMIT_HOURS: f64 = 70.0;

/// A request to plan a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Where the driver is before the trip starts
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the current cycle
    pub current_cycle_used_hours: f64,
}

impl TripRequest {
    /// Validate against the default 70-hour cycle
    pub fn validate(&self) -> Result<()> {
        self.validate_with_limit(DEFAULT_CYCLE_LIMIT_HOURS)
    }

    /// Validate all fields, reporting every problem found
    pub fn validate_with_limit(&self, cycle_limit_hours: f64) -> Result<()> {
        let mut problems = Vec::new();

        for (field, value) in [
            ("current_location", &self.current_location),
            ("pickup_location", &self.pickup_location),
            ("dropoff_location", &self.dropoff_location),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{field} cannot be empty"));
            } else if value.chars().count() > MAX_LOCATION_LEN {
                problems.push(format!(
                    "{field} exceeds {MAX_LOCATION_LEN} characters"
                ));
            }
        }

        let hours = self.current_cycle_used_hours;
        if !hours.is_finite() {
            problems.push("current_cycle_used_hours must be a number".into());
        } else if !(0.0..=cycle_limit_hours).contains(&hours) {
            problems.push(format!(
                "current_cycle_used_hours must be between 0 and {cycle_limit_hours}"
            ));
        } else if ((hours * 100.0).round() - hours * 100.0).abs() > 1e-6 {
            problems.push("current_cycle_used_hours allows at most 2 decimal places".into());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(HoslogError::validation(problems.join("; ")))
        }
    }
}
