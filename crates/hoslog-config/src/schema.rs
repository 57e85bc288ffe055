//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Storage and runtime settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Hours-of-service rule overrides
    #[serde(default)]
    pub rules: RawRules,

    /// Routing provider settings
    #[serde(default)]
    pub routing: RawRoutingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Data directory for the trip store
    pub data_dir: Option<PathBuf>,
}

/// Hours-of-service limits. Anything omitted keeps the federal
/// property-carrying 70-hour/8-day defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRules {
    /// Maximum driving per duty day
    pub max_driving_hours_per_day: Option<u64>,

    /// Maximum on-duty window per duty day
    pub max_on_duty_hours_per_day: Option<u64>,

    /// Cycle budget of combined driving and on-duty time
    pub cycle_limit_hours: Option<u64>,

    /// Driving allowed before a short rest break is required
    pub driving_before_break_hours: Option<u64>,

    /// Length of the short rest break
    pub rest_break_minutes: Option<u64>,

    /// Length of the daily off-duty reset
    pub daily_reset_hours: Option<u64>,

    /// Length of the off-duty period that restarts the cycle
    pub cycle_restart_hours: Option<u64>,

    /// Combined pickup and drop-off on-duty time
    pub pickup_dropoff_minutes: Option<u64>,

    /// Distance between fueling stops
    pub fuel_interval_miles: Option<f64>,

    /// Length of a fueling stop
    pub fueling_minutes: Option<u64>,

    /// Average speed used to turn driving time into distance
    pub average_speed_mph: Option<f64>,

    /// Largest single driving block the planner emits
    pub driving_chunk_minutes: Option<u64>,
}

/// Routing provider settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRoutingConfig {
    /// Provider base URL (default: https://api.openrouteservice.org)
    pub base_url: Option<String>,

    /// Environment variable holding the API key (default: ORS_API_KEY)
    pub api_key_env: Option<String>,

    /// Routing profile (default: driving-car)
    pub profile: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,

    /// Coordinates used when a location name is not known
    pub fallback: Option<RawPlace>,

    /// Known place names and their coordinates
    #[serde(default)]
    pub places: Vec<RawPlace>,
}

/// A named coordinate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPlace {
    #[serde(default)]
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}
