//! Validated policy structures

use crate::schema::{RawConfig, RawPlace, RawRoutingConfig, RawRules, RawServiceConfig};
use hoslog_util::{data_dir_without_env, hours, minutes};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_DRIVING_HOURS: u64 = 11;
pub const DEFAULT_MAX_ON_DUTY_HOURS: u64 = 14;
pub const DEFAULT_CYCLE_LIMIT_HOURS: u64 = 70;
pub const DEFAULT_DRIVING_BEFORE_BREAK_HOURS: u64 = 8;
pub const DEFAULT_REST_BREAK_MINUTES: u64 = 30;
pub const DEFAULT_DAILY_RESET_HOURS: u64 = 10;
pub const DEFAULT_CYCLE_RESTART_HOURS: u64 = 34;
pub const DEFAULT_PICKUP_DROPOFF_MINUTES: u64 = 120;
pub const DEFAULT_FUEL_INTERVAL_MILES: f64 = 1000.0;
pub const DEFAULT_FUELING_MINUTES: u64 = 60;
pub const DEFAULT_AVERAGE_SPEED_MPH: f64 = 60.0;
pub const DEFAULT_DRIVING_CHUNK_MINUTES: u64 = 60;

pub const DEFAULT_ROUTING_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_API_KEY_ENV: &str = "ORS_API_KEY";
pub const DEFAULT_ROUTING_PROFILE: &str = "driving-car";
pub const DEFAULT_ROUTING_TIMEOUT_SECS: u64 = 30;

/// Validated policy ready for use by the planner
#[derive(Debug, Clone, Default)]
pub struct Policy {
    /// Service configuration
    pub service: ServiceConfig,

    /// Hours-of-service limits
    pub rules: HosRules,

    /// Routing provider configuration
    pub routing: RoutingConfig,
}

impl Policy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            service: ServiceConfig::from_raw(raw.service),
            rules: HosRules::from_raw(&raw.rules),
            routing: RoutingConfig::from_raw(raw.routing),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(data_dir_without_env),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: data_dir_without_env(),
        }
    }
}

/// Hours-of-service limits driving the planner
#[derive(Debug, Clone, PartialEq)]
pub struct HosRules {
    pub max_daily_driving: Duration,
    pub max_daily_on_duty: Duration,
    pub cycle_limit: Duration,
    pub driving_before_break: Duration,
    pub rest_break: Duration,
    pub daily_reset: Duration,
    pub cycle_restart: Duration,
    pub pickup_dropoff: Duration,
    pub fuel_interval_miles: f64,
    pub fueling_stop: Duration,
    pub average_speed_mph: f64,
    pub driving_chunk: Duration,
}

impl HosRules {
    /// Fill omitted values with the defaults
    pub fn from_raw(raw: &RawRules) -> Self {
        Self {
            max_daily_driving: hours(
                raw.max_driving_hours_per_day
                    .unwrap_or(DEFAULT_MAX_DRIVING_HOURS),
            ),
            max_daily_on_duty: hours(
                raw.max_on_duty_hours_per_day
                    .unwrap_or(DEFAULT_MAX_ON_DUTY_HOURS),
            ),
            cycle_limit: hours(raw.cycle_limit_hours.unwrap_or(DEFAULT_CYCLE_LIMIT_HOURS)),
            driving_before_break: hours(
                raw.driving_before_break_hours
                    .unwrap_or(DEFAULT_DRIVING_BEFORE_BREAK_HOURS),
            ),
            rest_break: minutes(raw.rest_break_minutes.unwrap_or(DEFAULT_REST_BREAK_MINUTES)),
            daily_reset: hours(raw.daily_reset_hours.unwrap_or(DEFAULT_DAILY_RESET_HOURS)),
            cycle_restart: hours(
                raw.cycle_restart_hours
                    .unwrap_or(DEFAULT_CYCLE_RESTART_HOURS),
            ),
            pickup_dropoff: minutes(
                raw.pickup_dropoff_minutes
                    .unwrap_or(DEFAULT_PICKUP_DROPOFF_MINUTES),
            ),
            fuel_interval_miles: raw
                .fuel_interval_miles
                .unwrap_or(DEFAULT_FUEL_INTERVAL_MILES),
            fueling_stop: minutes(raw.fueling_minutes.unwrap_or(DEFAULT_FUELING_MINUTES)),
            average_speed_mph: raw.average_speed_mph.unwrap_or(DEFAULT_AVERAGE_SPEED_MPH),
            driving_chunk: minutes(
                raw.driving_chunk_minutes
                    .unwrap_or(DEFAULT_DRIVING_CHUNK_MINUTES),
            ),
        }
    }
}

impl Default for HosRules {
    fn default() -> Self {
        Self::from_raw(&RawRules::default())
    }
}

/// A named coordinate pair (longitude first, as routing providers expect)
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
        }
    }

    fn from_raw(raw: RawPlace) -> Self {
        Self {
            name: raw.name,
            lon: raw.lon,
            lat: raw.lat,
        }
    }
}

/// Routing provider configuration
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub profile: String,
    pub timeout: Duration,
    pub fallback: Place,
    pub places: Vec<Place>,
}

impl RoutingConfig {
    fn from_raw(raw: RawRoutingConfig) -> Self {
        let places = if raw.places.is_empty() {
            default_places()
        } else {
            raw.places.into_iter().map(Place::from_raw).collect()
        };

        Self {
            base_url: raw
                .base_url
                .unwrap_or_else(|| DEFAULT_ROUTING_BASE_URL.to_string()),
            api_key_env: raw
                .api_key_env
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            profile: raw
                .profile
                .unwrap_or_else(|| DEFAULT_ROUTING_PROFILE.to_string()),
            timeout: Duration::from_secs(
                raw.timeout_seconds.unwrap_or(DEFAULT_ROUTING_TIMEOUT_SECS),
            ),
            fallback: raw.fallback.map(Place::from_raw).unwrap_or_else(default_fallback),
            places,
        }
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::from_raw(RawRoutingConfig::default())
    }
}

fn default_fallback() -> Place {
    Place::new("Washington, D.C.", -77.0369, 38.9072)
}

fn default_places() -> Vec<Place> {
    vec![
        Place::new("Washington, D.C.", -77.0369, 38.9072),
        Place::new("Baltimore, MD", -76.6122, 39.2904),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_federal_property_carrying() {
        let rules = HosRules::default();
        assert_eq!(rules.max_daily_driving, hours(11));
        assert_eq!(rules.max_daily_on_duty, hours(14));
        assert_eq!(rules.cycle_limit, hours(70));
        assert_eq!(rules.driving_before_break, hours(8));
        assert_eq!(rules.rest_break, minutes(30));
        assert_eq!(rules.daily_reset, hours(10));
        assert_eq!(rules.cycle_restart, Duration::from_secs(122_400));
        assert_eq!(rules.pickup_dropoff, hours(2));
        assert_eq!(rules.fueling_stop, hours(1));
        assert_eq!(rules.driving_chunk, hours(1));
    }

    #[test]
    fn overrides_apply() {
        let raw = RawRules {
            cycle_limit_hours: Some(60),
            driving_chunk_minutes: Some(15),
            ..Default::default()
        };
        let rules = HosRules::from_raw(&raw);
        assert_eq!(rules.cycle_limit, hours(60));
        assert_eq!(rules.driving_chunk, minutes(15));
        assert_eq!(rules.max_daily_driving, hours(11));
    }

    #[test]
    fn routing_defaults() {
        let routing = RoutingConfig::default();
        assert_eq!(routing.api_key_env, "ORS_API_KEY");
        assert_eq!(routing.profile, "driving-car");
        assert_eq!(routing.places.len(), 2);
        assert_eq!(routing.fallback.name, "Washington, D.C.");
    }
}
