//! Log compiler: day padding and adjacent segment merging

use hoslog_api::{DutyStatus, LogEntry};
use hoslog_util::SECS_PER_DAY;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::DutySegment;

pub const FILLER_NOTE: &str = "Off-Duty filler";

/// Length of one log day
pub const LOG_DAY: Duration = Duration::from_secs(SECS_PER_DAY);

/// Pad every day to 24 hours, then merge adjacent segments of the same
/// activity. Compiling already compiled output returns it unchanged.
pub fn compile(segments: Vec<DutySegment>) -> Vec<DutySegment> {
    merge_adjacent(pad_days(segments))
}

/// Append an off-duty filler after the last segment of each day whose
/// segments add up to less than 24 hours. Days already at or past 24 hours
/// (a 34-hour restart, for one) are left alone.
pub fn pad_days(segments: Vec<DutySegment>) -> Vec<DutySegment> {
    let mut totals: BTreeMap<u32, Duration> = BTreeMap::new();
    let mut last_index: BTreeMap<u32, usize> = BTreeMap::new();
    for (i, segment) in segments.iter().enumerate() {
        *totals.entry(segment.day).or_default() += segment.duration;
        last_index.insert(segment.day, i);
    }

    let mut padded = Vec::with_capacity(segments.len() + totals.len());
    for (i, segment) in segments.into_iter().enumerate() {
        let day = segment.day;
        padded.push(segment);

        if last_index.get(&day) == Some(&i) {
            let total = totals.get(&day).copied().unwrap_or_default();
            let remainder = LOG_DAY.saturating_sub(total);
            if !remainder.is_zero() {
                padded.push(
                    DutySegment::new(day, DutyStatus::OffDuty, remainder).with_note(FILLER_NOTE),
                );
            }
        }
    }

    padded
}

/// Merge each segment into its predecessor when both describe the same
/// activity (see [`DutySegment::same_activity`]). Durations are summed, so no
/// logged time is dropped.
pub fn merge_adjacent(segments: Vec<DutySegment>) -> Vec<DutySegment> {
    let mut merged: Vec<DutySegment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(prev) if prev.same_activity(&segment) => prev.duration += segment.duration,
            _ => merged.push(segment),
        }
    }

    merged
}

/// Render compiled segments as log entries
pub fn render(segments: &[DutySegment]) -> Vec<LogEntry> {
    segments.iter().map(DutySegment::to_log_entry).collect()
}

/// Total logged time per day
pub fn day_totals(segments: &[DutySegment]) -> BTreeMap<u32, Duration> {
    let mut totals = BTreeMap::new();
    for segment in segments {
        *totals.entry(segment.day).or_default() += segment.duration;
    }
    totals
}
