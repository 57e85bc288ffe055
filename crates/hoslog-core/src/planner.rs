//! Trip planner: scheduler plus compiler behind one call

use hoslog_api::{DailySheet, LogEntry, PlanOutcome, TripLog};
use hoslog_config::HosRules;
use hoslog_util::{as_hours_f64, duration_from_hours_f64, duration_from_secs_f64, round_2dp};
use std::time::Duration;
use tracing::debug;

use crate::{compile, daily_sheets, render, DutySegment, Scheduler};

/// A compiled plan for one trip
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub segments: Vec<DutySegment>,
    pub outcome: PlanOutcome,
    pub driving_requested: Duration,
    pub driving_scheduled: Duration,
    pub distance_miles: f64,
}

impl TripPlan {
    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }

    /// Number of distinct days on the log
    pub fn day_count(&self) -> u32 {
        self.segments.iter().map(|s| s.day).max().unwrap_or(0)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        render(&self.segments)
    }

    pub fn sheets(&self) -> Vec<DailySheet> {
        daily_sheets(&self.segments)
    }

    pub fn to_trip_log(&self) -> TripLog {
        TripLog {
            outcome: self.outcome,
            driving_hours_planned: round_2dp(as_hours_f64(self.driving_requested)),
            driving_hours_covered: round_2dp(as_hours_f64(self.driving_scheduled)),
            days: self.day_count(),
            entries: self.entries(),
        }
    }
}

/// Plans trips under one rule set
#[derive(Debug, Clone, Default)]
pub struct TripPlanner {
    rules: HosRules,
}

impl TripPlanner {
    pub fn new(rules: HosRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Plan a trip from caller-supplied numbers.
    ///
    /// Inputs are clamped rather than rejected: a negative or non-finite trip
    /// duration counts as zero, and cycle hours are held to
    /// `[0, cycle limit]`. Reject bad input before this point if it matters
    /// (see `TripRequest::validate`). Very long trips are not rejected either:
    /// the scheduler stops after [`crate::MAX_SCHEDULER_ITERATIONS`] loop
    /// passes and the plan comes back `Stalled`.
    pub fn plan(&self, trip_duration_secs: f64, current_cycle_used_hours: f64) -> TripPlan {
        let trip = duration_from_secs_f64(trip_duration_secs);
        let cycle_used = duration_from_hours_f64(current_cycle_used_hours).min(self.rules.cycle_limit);

        debug!(
            trip_secs = trip.as_secs_f64(),
            cycle_used_hours = as_hours_f64(cycle_used),
            "Planning trip"
        );

        self.plan_durations(trip, cycle_used)
    }

    pub fn plan_durations(&self, trip: Duration, cycle_used: Duration) -> TripPlan {
        let run = Scheduler::new(&self.rules).run(trip, cycle_used);

        TripPlan {
            segments: compile(run.segments),
            outcome: run.outcome,
            driving_requested: run.driving_requested,
            driving_scheduled: run.driving_scheduled,
            distance_miles: run.distance_miles,
        }
    }
}

/// Plan a trip under the default rules
pub fn plan_trip(trip_duration_secs: f64, current_cycle_used_hours: f64) -> TripLog {
    TripPlanner::default()
        .plan(trip_duration_secs, current_cycle_used_hours)
        .to_trip_log()
}
