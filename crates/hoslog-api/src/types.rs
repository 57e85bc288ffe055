//! Shared types for hoslog output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Duty status of a block of time on a driver's log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyStatus {
    Driving,
    OnDuty,
    OffDuty,
}

impl DutyStatus {
    /// Whether time in this status counts against the daily on-duty window
    pub fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "OnDuty",
            DutyStatus::OffDuty => "OffDuty",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered line of a driver's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based day of the trip
    pub day: u32,
    pub status: DutyStatus,
    /// Duration in hours, rounded to two decimals
    pub hours: f64,
    /// Label such as "Fueling Stop"; empty for plain driving
    #[serde(default)]
    pub notes: String,
}

/// How a planning run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    /// All of the trip's driving time was scheduled
    Completed,
    /// The driver started with no cycle hours left; only a restart was logged
    CycleExhausted,
    /// The run stopped with driving time still unscheduled
    Stalled,
}

impl PlanOutcome {
    pub fn is_complete(self) -> bool {
        self == PlanOutcome::Completed
    }
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOutcome::Completed => write!(f, "completed"),
            PlanOutcome::CycleExhausted => write!(f, "cycle exhausted"),
            PlanOutcome::Stalled => write!(f, "stalled"),
        }
    }
}

/// Compiled duty log for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLog {
    pub outcome: PlanOutcome,
    /// Driving time the trip needs, in hours
    pub driving_hours_planned: f64,
    /// Driving time actually placed on the log, in hours
    pub driving_hours_covered: f64,
    /// Number of distinct days on the log
    pub days: u32,
    pub entries: Vec<LogEntry>,
}

impl TripLog {
    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }

    /// Entries belonging to a single day
    pub fn entries_for_day(&self, day: u32) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.day == day)
    }
}

/// One turn-by-turn instruction from the routing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInstruction {
    pub instruction: String,
    #[serde(default)]
    pub name: String,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

/// Everything handed back for a planned trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub trip_id: Option<String>,
    pub route_instructions: Vec<RouteInstruction>,
    pub route_geometry: Option<String>,
    pub daily_logs: Vec<LogEntry>,
    pub outcome: PlanOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_status_serializes_as_variant_name() {
        assert_eq!(serde_json::to_string(&DutyStatus::OnDuty).unwrap(), "\"OnDuty\"");
        assert_eq!(serde_json::to_string(&DutyStatus::OffDuty).unwrap(), "\"OffDuty\"");
        let parsed: DutyStatus = serde_json::from_str("\"Driving\"").unwrap();
        assert_eq!(parsed, DutyStatus::Driving);
    }

    #[test]
    fn on_duty_statuses() {
        assert!(DutyStatus::Driving.is_on_duty());
        assert!(DutyStatus::OnDuty.is_on_duty());
        assert!(!DutyStatus::OffDuty.is_on_duty());
    }

    #[test]
    fn log_entry_notes_default_to_empty() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"day": 1, "status": "Driving", "hours": 1.0}"#).unwrap();
        assert_eq!(entry.notes, "");
    }

    #[test]
    fn outcome_completion() {
        assert!(PlanOutcome::Completed.is_complete());
        assert!(!PlanOutcome::Stalled.is_complete());
        assert!(!PlanOutcome::CycleExhausted.is_complete());
        assert_eq!(
            serde_json::to_string(&PlanOutcome::CycleExhausted).unwrap(),
            "\"cycle_exhausted\""
        );
    }

    #[test]
    fn trip_response_uses_camel_case_keys() {
        let response = TripResponse {
            trip_id: None,
            route_instructions: vec![],
            route_geometry: Some("abc".into()),
            daily_logs: vec![],
            outcome: PlanOutcome::Completed,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("routeGeometry").is_some());
        assert!(json.get("dailyLogs").is_some());
        assert!(json.get("routeInstructions").is_some());
    }
}
