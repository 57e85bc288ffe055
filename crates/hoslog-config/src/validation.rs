//! Configuration validation

use crate::policy::HosRules;
use crate::schema::{RawConfig, RawPlace, RawRoutingConfig};
use hoslog_util::SECS_PER_DAY;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Rule '{field}': {message}")]
    InvalidRule {
        field: &'static str,
        message: String,
    },

    #[error("Conflicting rules: {0}")]
    RuleConflict(String),

    #[error("Place '{name}': {message}")]
    InvalidPlace { name: String, message: String },

    #[error("Duplicate place name: {0}")]
    DuplicatePlace(String),

    #[error("Routing config error: {0}")]
    RoutingError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = validate_rules(&HosRules::from_raw(&config.rules));
    errors.extend(validate_routing(&config.routing));
    errors
}

/// Check a resolved rule set for values the planner cannot work with
pub fn validate_rules(rules: &HosRules) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required: [(&'static str, Duration); 8] = [
        ("max_driving_hours_per_day", rules.max_daily_driving),
        ("max_on_duty_hours_per_day", rules.max_daily_on_duty),
        ("cycle_limit_hours", rules.cycle_limit),
        ("driving_before_break_hours", rules.driving_before_break),
        ("rest_break_minutes", rules.rest_break),
        ("daily_reset_hours", rules.daily_reset),
        ("cycle_restart_hours", rules.cycle_restart),
        ("fueling_minutes", rules.fueling_stop),
    ];
    for (field, value) in required {
        if value.is_zero() {
            errors.push(ValidationError::InvalidRule {
                field,
                message: "must be greater than zero".into(),
            });
        }
    }

    if rules.driving_chunk.is_zero() {
        errors.push(ValidationError::InvalidRule {
            field: "driving_chunk_minutes",
            message: "must be greater than zero".into(),
        });
    } else if rules.driving_chunk > rules.max_daily_driving {
        errors.push(ValidationError::RuleConflict(
            "driving_chunk_minutes exceeds max_driving_hours_per_day".into(),
        ));
    }

    if !is_positive_finite(rules.average_speed_mph) {
        errors.push(ValidationError::InvalidRule {
            field: "average_speed_mph",
            message: "must be a positive number".into(),
        });
    }

    if !is_positive_finite(rules.fuel_interval_miles) {
        errors.push(ValidationError::InvalidRule {
            field: "fuel_interval_miles",
            message: "must be a positive number".into(),
        });
    }

    if rules.max_daily_driving > rules.max_daily_on_duty {
        errors.push(ValidationError::RuleConflict(
            "max_driving_hours_per_day exceeds max_on_duty_hours_per_day".into(),
        ));
    }

    if rules.pickup_dropoff >= rules.max_daily_on_duty {
        errors.push(ValidationError::RuleConflict(
            "pickup_dropoff_minutes must be shorter than max_on_duty_hours_per_day".into(),
        ));
    }

    // A duty day plus its daily reset has to fit in one 24-hour log day
    let log_day = Duration::from_secs(SECS_PER_DAY);
    if rules.daily_reset >= log_day {
        errors.push(ValidationError::RuleConflict(
            "daily_reset_hours must be shorter than 24 hours".into(),
        ));
    } else if rules.pickup_dropoff < rules.max_daily_on_duty
        && rules.pickup_dropoff >= log_day - rules.daily_reset
    {
        errors.push(ValidationError::RuleConflict(
            "pickup_dropoff_minutes leaves no time to drive before the daily reset".into(),
        ));
    }

    errors
}

fn validate_routing(routing: &RawRoutingConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(url) = &routing.base_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        errors.push(ValidationError::RoutingError(format!(
            "base_url '{}' must start with http:// or https://",
            url
        )));
    }

    if routing.timeout_seconds == Some(0) {
        errors.push(ValidationError::RoutingError(
            "timeout_seconds must be greater than zero".into(),
        ));
    }

    if let Some(env) = &routing.api_key_env
        && env.trim().is_empty()
    {
        errors.push(ValidationError::RoutingError(
            "api_key_env cannot be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for place in &routing.places {
        if place.name.trim().is_empty() {
            errors.push(ValidationError::InvalidPlace {
                name: place.name.clone(),
                message: "name cannot be empty".into(),
            });
        } else if !seen.insert(place.name.to_lowercase()) {
            errors.push(ValidationError::DuplicatePlace(place.name.clone()));
        }
        errors.extend(validate_coordinates(place));
    }

    if let Some(fallback) = &routing.fallback {
        errors.extend(validate_coordinates(fallback));
    }

    errors
}

fn validate_coordinates(place: &RawPlace) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !(-180.0..=180.0).contains(&place.lon) {
        errors.push(ValidationError::InvalidPlace {
            name: place.name.clone(),
            message: format!("longitude {} out of range", place.lon),
        });
    }
    if !(-90.0..=90.0).contains(&place.lat) {
        errors.push(ValidationError::InvalidPlace {
            name: place.name.clone(),
            message: format!("latitude {} out of range", place.lat),
        });
    }

    errors
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawRules;

    fn make_config(rules: RawRules) -> RawConfig {
        RawConfig {
            config_version: 1,
            service: Default::default(),
            rules,
            routing: Default::default(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&make_config(RawRules::default())).is_empty());
    }

    #[test]
    fn zero_limits_rejected() {
        let config = make_config(RawRules {
            cycle_limit_hours: Some(0),
            cycle_restart_hours: Some(0),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ValidationError::InvalidRule { .. })));
    }

    #[test]
    fn driving_above_on_duty_rejected() {
        let config = make_config(RawRules {
            max_driving_hours_per_day: Some(15),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::RuleConflict(_))));
    }

    #[test]
    fn bad_speed_rejected() {
        let config = make_config(RawRules {
            average_speed_mph: Some(-10.0),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidRule { field: "average_speed_mph", .. }
        )));
    }

    #[test]
    fn zero_pickup_is_allowed() {
        let config = make_config(RawRules {
            pickup_dropoff_minutes: Some(0),
            ..Default::default()
        });
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn pickup_filling_the_on_duty_window_rejected() {
        let config = make_config(RawRules {
            pickup_dropoff_minutes: Some(14 * 60),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::RuleConflict(_)));
    }

    #[test]
    fn daily_reset_filling_the_log_day_rejected() {
        let config = make_config(RawRules {
            daily_reset_hours: Some(24),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::RuleConflict(_)));
    }

    #[test]
    fn pickup_filling_the_day_before_reset_rejected() {
        // 13 h reset leaves 11 h of the day; a 12 h pickup still fits in 14 h on duty
        let config = make_config(RawRules {
            daily_reset_hours: Some(13),
            pickup_dropoff_minutes: Some(12 * 60),
            ..Default::default()
        });

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("daily reset"));
    }

    #[test]
    fn duplicate_and_out_of_range_places() {
        let mut config = make_config(RawRules::default());
        config.routing.places = vec![
            RawPlace {
                name: "Baltimore, MD".into(),
                lon: -76.6122,
                lat: 39.2904,
            },
            RawPlace {
                name: "baltimore, md".into(),
                lon: -76.6122,
                lat: 139.0,
            },
        ];

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicatePlace(_))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidPlace { .. })));
    }

    #[test]
    fn bad_base_url_rejected() {
        let mut config = make_config(RawRules::default());
        config.routing.base_url = Some("ftp://example.com".into());

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::RoutingError(_))));
    }
}
