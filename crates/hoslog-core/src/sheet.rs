//! Lay compiled segments out on per-day 24-hour grids

use hoslog_api::{DailySheet, DutyStatus, SheetRow, StatusTotals, MINUTES_PER_DAY};
use hoslog_util::{round_hours, SECS_PER_MINUTE};
use std::time::Duration;

use crate::{DutySegment, LOG_DAY};

/// Build one sheet per day, in day order.
///
/// Rows are placed back to back from midnight. Anything past the end of the
/// day is clipped from the grid and reported as `carried_over_hours`.
pub fn daily_sheets(segments: &[DutySegment]) -> Vec<DailySheet> {
    let mut days: Vec<u32> = segments.iter().map(|s| s.day).collect();
    days.sort_unstable();
    days.dedup();

    days.into_iter()
        .map(|day| {
            let day_segments: Vec<&DutySegment> =
                segments.iter().filter(|s| s.day == day).collect();
            build_sheet(day, &day_segments)
        })
        .collect()
}

fn build_sheet(day: u32, segments: &[&DutySegment]) -> DailySheet {
    let mut rows = Vec::with_capacity(segments.len());
    let mut cursor = Duration::ZERO;
    let mut driving = Duration::ZERO;
    let mut on_duty = Duration::ZERO;
    let mut off_duty = Duration::ZERO;

    for segment in segments {
        let start = cursor.min(LOG_DAY);
        let end = (cursor + segment.duration).min(LOG_DAY);
        cursor += segment.duration;

        let visible = end - start;
        if visible.is_zero() {
            continue;
        }

        match segment.status {
            DutyStatus::Driving => driving += visible,
            DutyStatus::OnDuty => on_duty += visible,
            DutyStatus::OffDuty => off_duty += visible,
        }

        rows.push(SheetRow {
            start_minute: to_minute(start),
            end_minute: to_minute(end),
            status: segment.status,
            remarks: segment.note_str().to_string(),
        });
    }

    DailySheet {
        day,
        rows,
        totals: StatusTotals {
            driving_hours: round_hours(driving),
            on_duty_hours: round_hours(on_duty),
            off_duty_hours: round_hours(off_duty),
        },
        carried_over_hours: round_hours(cursor.saturating_sub(LOG_DAY)),
    }
}

fn to_minute(offset: Duration) -> u32 {
    let minute = (offset.as_secs() + SECS_PER_MINUTE / 2) / SECS_PER_MINUTE;
    u32::try_from(minute).unwrap_or(MINUTES_PER_DAY).min(MINUTES_PER_DAY)
}
