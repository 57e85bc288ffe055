//! Daily log sheet view
//!
//! A sheet lays one day's log entries on a 24-hour grid, the way a paper
//! log or ELD graph shows them.

use serde::{Deserialize, Serialize};

use crate::DutyStatus;

/// Minutes in one log day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// One row of a daily sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Minute of the day the row starts at (0..=1440)
    pub start_minute: u32,
    /// Minute of the day the row ends at (0..=1440)
    pub end_minute: u32,
    pub status: DutyStatus,
    pub remarks: String,
}

impl SheetRow {
    pub fn minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }
}

/// Hours per status on one sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusTotals {
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
}

impl StatusTotals {
    pub fn total_hours(&self) -> f64 {
        self.driving_hours + self.on_duty_hours + self.off_duty_hours
    }
}

/// One day of the trip laid out on a 24-hour grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySheet {
    pub day: u32,
    pub rows: Vec<SheetRow>,
    pub totals: StatusTotals,
    /// Time logged on this day past the end of the grid (e.g. the rest of a
    /// 34-hour restart), in hours
    pub carried_over_hours: f64,
}
