//! Duty segments

use hoslog_api::{DutyStatus, LogEntry};
use hoslog_util::round_hours;
use std::time::Duration;

/// One block of time in a single duty status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutySegment {
    /// 1-based trip day
    pub day: u32,
    pub status: DutyStatus,
    pub duration: Duration,
    pub note: Option<String>,
}

impl DutySegment {
    pub fn new(day: u32, status: DutyStatus, duration: Duration) -> Self {
        Self {
            day,
            status,
            duration,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Same day, status and note. Two such segments next to each other
    /// describe one continuous activity and may be merged.
    pub fn same_activity(&self, other: &DutySegment) -> bool {
        self.day == other.day && self.status == other.status && self.note == other.note
    }

    pub fn note_str(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    /// Render for output, with hours rounded to two decimals
    pub fn to_log_entry(&self) -> LogEntry {
        LogEntry {
            day: self.day,
            status: self.status,
            hours: round_hours(self.duration),
            notes: self.note_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoslog_util::{hours, minutes};

    #[test]
    fn same_activity_ignores_duration() {
        let a = DutySegment::new(1, DutyStatus::Driving, hours(1));
        let b = DutySegment::new(1, DutyStatus::Driving, minutes(20));
        assert!(a.same_activity(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn same_activity_respects_day_and_note() {
        let a = DutySegment::new(1, DutyStatus::OnDuty, hours(1)).with_note("Fueling Stop");
        let b = DutySegment::new(2, DutyStatus::OnDuty, hours(1)).with_note("Fueling Stop");
        let c = DutySegment::new(1, DutyStatus::OnDuty, hours(1));
        assert!(!a.same_activity(&b));
        assert!(!a.same_activity(&c));
    }

    #[test]
    fn log_entry_rounding() {
        let segment = DutySegment::new(3, DutyStatus::Driving, Duration::from_secs(3724));
        let entry = segment.to_log_entry();
        assert_eq!(entry.day, 3);
        assert_eq!(entry.hours, 1.03);
        assert_eq!(entry.notes, "");
    }
}
