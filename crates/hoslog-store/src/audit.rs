//! Audit event types

use chrono::{DateTime, Local};
use hoslog_api::PlanOutcome;
use hoslog_util::TripId;
use serde::{Deserialize, Serialize};

/// Types of audit events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEventType {
    /// Rules loaded from a config file or defaults
    RulesLoaded { source: String },

    /// A trip was planned and saved
    TripPlanned {
        trip_id: TripId,
        outcome: PlanOutcome,
        days: u32,
        driving_hours: f64,
    },

    /// A trip request failed validation
    RequestRejected { reason: String },

    /// The routing service could not produce a route
    RouteLookupFailed { reason: String },
}

/// Full audit event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID
    pub id: i64,

    /// Event timestamp
    pub timestamp: DateTime<Local>,

    /// Event type and details
    pub event: AuditEventType,
}

impl AuditEvent {
    pub fn new(event: AuditEventType) -> Self {
        Self {
            id: 0, // Will be set by store
            timestamp: Local::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_tagged_by_type() {
        let event = AuditEventType::TripPlanned {
            trip_id: TripId::new(),
            outcome: PlanOutcome::Completed,
            days: 2,
            driving_hours: 15.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "trip_planned");
        assert_eq!(json["outcome"], "completed");
    }
}
