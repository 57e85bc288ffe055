//! Segment scheduler: turns a trip's driving time into duty segments

use hoslog_api::{DutyStatus, PlanOutcome};
use hoslog_config::HosRules;
use hoslog_util::{as_hours_f64, SECS_PER_HOUR, SECS_PER_MINUTE};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{DutyClock, DutySegment};

pub const PICKUP_DROPOFF_NOTE: &str = "Pickup and Drop-off Time";
pub const FUELING_NOTE: &str = "Fueling Stop";

/// Hard ceiling on loop passes, whatever the trip length
pub const MAX_SCHEDULER_ITERATIONS: usize = 200_000;

/// Raw output of one scheduler run, before compilation
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    pub segments: Vec<DutySegment>,
    pub outcome: PlanOutcome,
    /// Driving time the trip asked for
    pub driving_requested: Duration,
    /// Driving time placed on the log
    pub driving_scheduled: Duration,
    /// Miles covered by the scheduled driving
    pub distance_miles: f64,
    /// Main loop passes used
    pub iterations: usize,
}

/// Single-pass scheduler over a [`DutyClock`].
///
/// Each loop pass first handles an exhausted cycle (restart), then drives one
/// block sized to the tightest of chunk size, cycle, trip remaining, daily
/// driving, daily on-duty and the room left in the day. After the block it
/// inserts any fueling stop, rest break or daily reset that became due. A
/// fueling stop that would not fit is deferred: the fuel counter is only
/// cleared once the stop is logged. A rest break that would not fit in the
/// day ends the day instead, with the daily reset standing in for it.
pub struct Scheduler<'a> {
    rules: &'a HosRules,
    iteration_limit: Option<usize>,
}

impl<'a> Scheduler<'a> {
    pub fn new(rules: &'a HosRules) -> Self {
        Self {
            rules,
            iteration_limit: None,
        }
    }

    /// Override the loop bound derived from the trip length
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// Loop passes allowed for a trip before the run is declared stalled,
    /// never more than [`MAX_SCHEDULER_ITERATIONS`]
    pub fn iteration_bound(&self, trip: Duration) -> usize {
        if let Some(limit) = self.iteration_limit {
            return limit;
        }
        let chunk = self.rules.driving_chunk.as_nanos().max(1);
        let chunks = usize::try_from(trip.as_nanos().div_ceil(chunk)).unwrap_or(usize::MAX);
        chunks
            .saturating_add(1)
            .saturating_mul(8)
            .saturating_add(16)
            .min(MAX_SCHEDULER_ITERATIONS)
    }

    pub fn run(&self, trip: Duration, cycle_used: Duration) -> ScheduleRun {
        let rules = self.rules;
        let mut clock = DutyClock::new(rules, cycle_used);
        let mut segments = Vec::new();

        if clock.remaining_cycle().is_zero() {
            info!(
                cycle_used_hours = as_hours_f64(cycle_used),
                "Cycle exhausted before the trip, restart required"
            );
            segments.push(
                DutySegment::new(clock.day(), DutyStatus::OffDuty, rules.cycle_restart)
                    .with_note(restart_note(rules)),
            );
            return ScheduleRun {
                segments,
                outcome: PlanOutcome::CycleExhausted,
                driving_requested: trip,
                driving_scheduled: Duration::ZERO,
                distance_miles: 0.0,
                iterations: 0,
            };
        }

        let pickup = rules.pickup_dropoff.min(clock.remaining_cycle());
        if !pickup.is_zero() {
            push(
                &mut segments,
                DutySegment::new(clock.day(), DutyStatus::OnDuty, pickup)
                    .with_note(PICKUP_DROPOFF_NOTE),
            );
            clock.apply_on_duty(pickup);
        }

        let bound = self.iteration_bound(trip);
        let mut driven = Duration::ZERO;
        let mut iterations = 0;
        let mut stalled = false;

        while driven < trip {
            if iterations >= bound {
                warn!(iterations, "Iteration bound reached, stopping run");
                stalled = true;
                break;
            }
            iterations += 1;

            if clock.remaining_cycle().is_zero() {
                push(
                    &mut segments,
                    DutySegment::new(clock.day(), DutyStatus::OffDuty, rules.cycle_restart)
                        .with_note(format!("{} (Cycle limit reached)", restart_note(rules))),
                );
                clock.reset_cycle();
                continue;
            }

            let block = rules
                .driving_chunk
                .min(clock.remaining_cycle())
                .min(trip - driven)
                .min(clock.remaining_daily_driving())
                .min(clock.remaining_daily_on_duty())
                .min(clock.remaining_day());
            if block.is_zero() {
                warn!(
                    day = clock.day(),
                    remaining_hours = as_hours_f64(trip - driven),
                    "No capacity left to drive, stopping run"
                );
                stalled = true;
                break;
            }

            push(
                &mut segments,
                DutySegment::new(clock.day(), DutyStatus::Driving, block),
            );
            clock.apply_driving(block);
            driven += block;

            if clock.needs_fuel() {
                let fueling = rules
                    .fueling_stop
                    .min(clock.remaining_cycle())
                    .min(clock.remaining_daily_on_duty())
                    .min(clock.remaining_day());
                if !fueling.is_zero() {
                    push(
                        &mut segments,
                        DutySegment::new(clock.day(), DutyStatus::OnDuty, fueling)
                            .with_note(FUELING_NOTE),
                    );
                    clock.apply_on_duty(fueling);
                    clock.reset_fuel();
                }
            }

            let mut break_deferred = false;
            if clock.needs_break() {
                let rest = rules.rest_break.min(clock.remaining_cycle());
                if rest > clock.remaining_day() {
                    break_deferred = true;
                } else if !rest.is_zero() {
                    push(
                        &mut segments,
                        DutySegment::new(clock.day(), DutyStatus::OffDuty, rest)
                            .with_note(rest_break_note(rules)),
                    );
                    clock.apply_off_duty(rest);
                    clock.reset_break();
                }
            }

            if break_deferred || clock.daily_limit_reached() || driven >= trip {
                push(
                    &mut segments,
                    DutySegment::new(clock.day(), DutyStatus::OffDuty, rules.daily_reset)
                        .with_note(daily_reset_note(rules)),
                );
                clock.apply_off_duty(rules.daily_reset);
                clock.rollover_day();
            }
        }

        let outcome = if stalled {
            PlanOutcome::Stalled
        } else {
            PlanOutcome::Completed
        };

        info!(
            %outcome,
            segments = segments.len(),
            driving_hours = as_hours_f64(driven),
            days = clock.day(),
            "Schedule run finished"
        );

        ScheduleRun {
            segments,
            outcome,
            driving_requested: trip,
            driving_scheduled: driven,
            distance_miles: clock.total_distance_miles(),
            iterations,
        }
    }
}

fn push(segments: &mut Vec<DutySegment>, segment: DutySegment) {
    debug!(
        day = segment.day,
        status = %segment.status,
        secs = segment.duration.as_secs_f64(),
        note = segment.note_str(),
        "Segment scheduled"
    );
    segments.push(segment);
}

/// "34-Hour Restart" for the default rules
pub fn restart_note(rules: &HosRules) -> String {
    format!("{}-Hour Restart", rules.cycle_restart.as_secs() / SECS_PER_HOUR)
}

/// "30-Min Rest Break" for the default rules
pub fn rest_break_note(rules: &HosRules) -> String {
    format!("{}-Min Rest Break", rules.rest_break.as_secs() / SECS_PER_MINUTE)
}

/// "10-Hour Off-Duty Break" for the default rules
pub fn daily_reset_note(rules: &HosRules) -> String {
    format!("{}-Hour Off-Duty Break", rules.daily_reset.as_secs() / SECS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoslog_util::{hours, minutes};

    fn driving_on_day(run: &ScheduleRun, day: u32) -> Duration {
        run.segments
            .iter()
            .filter(|s| s.day == day && s.status == DutyStatus::Driving)
            .map(|s| s.duration)
            .sum()
    }

    #[test]
    fn test_notes_for_default_rules() {
        let rules = HosRules::default();
        assert_eq!(restart_note(&rules), "34-Hour Restart");
        assert_eq!(rest_break_note(&rules), "30-Min Rest Break");
        assert_eq!(daily_reset_note(&rules), "10-Hour Off-Duty Break");
    }

    #[test]
    fn test_zero_trip_only_pickup() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(Duration::ZERO, Duration::ZERO);

        assert_eq!(run.outcome, PlanOutcome::Completed);
        assert_eq!(run.segments.len(), 1);
        assert_eq!(run.segments[0].status, DutyStatus::OnDuty);
        assert_eq!(run.segments[0].duration, hours(2));
        assert_eq!(run.iterations, 0);
    }

    #[test]
    fn test_exhausted_cycle_restarts_immediately() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(hours(5), hours(70));

        assert_eq!(run.outcome, PlanOutcome::CycleExhausted);
        assert_eq!(run.segments.len(), 1);
        let segment = &run.segments[0];
        assert_eq!(segment.day, 1);
        assert_eq!(segment.status, DutyStatus::OffDuty);
        assert_eq!(segment.duration, Duration::from_secs(122_400));
        assert_eq!(segment.note_str(), "34-Hour Restart");
        assert!(run.driving_scheduled.is_zero());
    }

    #[test]
    fn test_pickup_capped_by_cycle() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(Duration::ZERO, minutes(69 * 60 + 30));

        assert_eq!(run.segments[0].duration, minutes(30));
    }

    #[test]
    fn test_eight_hour_trip_takes_a_break() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(hours(8), Duration::ZERO);

        assert_eq!(run.outcome, PlanOutcome::Completed);
        assert_eq!(driving_on_day(&run, 1), hours(8));

        let statuses: Vec<_> = run
            .segments
            .iter()
            .map(|s| (s.status, s.note_str().to_string()))
            .collect();
        let tail = &statuses[statuses.len() - 2..];
        assert_eq!(tail[0], (DutyStatus::OffDuty, "30-Min Rest Break".to_string()));
        assert_eq!(tail[1], (DutyStatus::OffDuty, "10-Hour Off-Duty Break".to_string()));
        // pickup + 8 driving blocks + break + reset
        assert_eq!(run.segments.len(), 11);
    }

    #[test]
    fn test_partial_final_block() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(Duration::from_secs(3724), Duration::ZERO);

        let driving: Vec<_> = run
            .segments
            .iter()
            .filter(|s| s.status == DutyStatus::Driving)
            .map(|s| s.duration)
            .collect();
        assert_eq!(driving, vec![hours(1), Duration::from_secs(124)]);
    }

    #[test]
    fn test_daily_driving_cap_rolls_the_day() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(hours(15), Duration::ZERO);

        assert_eq!(run.outcome, PlanOutcome::Completed);
        assert_eq!(driving_on_day(&run, 1), hours(11));
        assert_eq!(driving_on_day(&run, 2), hours(4));

        let reset_index = run
            .segments
            .iter()
            .position(|s| s.note_str() == "10-Hour Off-Duty Break")
            .unwrap();
        assert_eq!(run.segments[reset_index].day, 1);
        assert_eq!(run.segments[reset_index + 1].day, 2);
        assert_eq!(run.segments[reset_index + 1].status, DutyStatus::Driving);
    }

    #[test]
    fn test_fueling_stop_after_interval() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(hours(20), Duration::ZERO);

        let fuel: Vec<_> = run
            .segments
            .iter()
            .filter(|s| s.note_str() == FUELING_NOTE)
            .collect();
        assert_eq!(fuel.len(), 1);
        assert_eq!(fuel[0].status, DutyStatus::OnDuty);
        assert_eq!(fuel[0].duration, hours(1));
        // 11 h on day 1, the 17th hour of driving crosses 1000 mi on day 2
        assert_eq!(fuel[0].day, 2);
        assert!((run.distance_miles - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn test_cycle_limit_forces_restart() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules).run(hours(10), hours(60));

        assert_eq!(run.outcome, PlanOutcome::Completed);
        assert_eq!(run.driving_scheduled, hours(10));

        let restart = run
            .segments
            .iter()
            .position(|s| s.note_str() == "34-Hour Restart (Cycle limit reached)")
            .unwrap();
        let restart_day = run.segments[restart].day;
        let next = &run.segments[restart + 1];
        assert_eq!(next.day, restart_day + 1);
        assert_eq!(next.status, DutyStatus::Driving);
    }

    #[test]
    fn test_iteration_bound_reports_stall() {
        let rules = HosRules::default();
        let run = Scheduler::new(&rules)
            .with_iteration_limit(3)
            .run(hours(20), Duration::ZERO);

        assert_eq!(run.outcome, PlanOutcome::Stalled);
        assert_eq!(run.iterations, 3);
        assert_eq!(run.driving_scheduled, hours(3));
    }

    #[test]
    fn test_no_daily_capacity_reports_stall() {
        // Bypasses config validation: pickup consumes the whole on-duty window
        let rules = HosRules {
            pickup_dropoff: hours(14),
            ..HosRules::default()
        };
        let run = Scheduler::new(&rules).run(hours(5), Duration::ZERO);

        assert_eq!(run.outcome, PlanOutcome::Stalled);
        assert!(run.driving_scheduled.is_zero());
        assert_eq!(run.segments.len(), 1);
    }

    #[test]
    fn test_iteration_bound_scales_with_trip() {
        let rules = HosRules::default();
        let scheduler = Scheduler::new(&rules);
        assert_eq!(scheduler.iteration_bound(Duration::ZERO), 24);
        assert_eq!(scheduler.iteration_bound(hours(10)), 8 * 11 + 16);
        assert!(scheduler.iteration_bound(hours(1000)) > 1000);
    }

    #[test]
    fn test_iteration_bound_has_a_ceiling() {
        let rules = HosRules::default();
        let scheduler = Scheduler::new(&rules);
        assert_eq!(scheduler.iteration_bound(Duration::MAX), MAX_SCHEDULER_ITERATIONS);
        assert_eq!(
            scheduler.iteration_bound(hours(1_000_000)),
            MAX_SCHEDULER_ITERATIONS
        );
    }

    #[test]
    fn test_fuel_on_pickup_day_keeps_day_within_24_hours() {
        // 100 mph puts the first 1000 mi inside the first duty day
        let rules = HosRules {
            average_speed_mph: 100.0,
            ..HosRules::default()
        };
        assert!(hoslog_config::validate_rules(&rules).is_empty());

        let run = Scheduler::new(&rules).run(hours(20), Duration::ZERO);
        assert_eq!(run.outcome, PlanOutcome::Completed);
        assert_eq!(run.driving_scheduled, hours(20));

        let day_one: Duration = run
            .segments
            .iter()
            .filter(|s| s.day == 1)
            .map(|s| s.duration)
            .sum();
        assert_eq!(day_one, hours(24));
        assert!(run
            .segments
            .iter()
            .any(|s| s.day == 1 && s.note_str() == FUELING_NOTE));
        assert_eq!(driving_on_day(&run, 1), minutes(630));
        assert_eq!(driving_on_day(&run, 2), minutes(570));
    }

    #[test]
    fn test_break_that_does_not_fit_ends_the_day() {
        // 10.25 h of loggable day: pickup and 8 h of driving leave 15 min,
        // too little for the 30 min break
        let rules = HosRules {
            daily_reset: minutes(13 * 60 + 45),
            ..HosRules::default()
        };
        let run = Scheduler::new(&rules).run(hours(9), Duration::ZERO);

        assert_eq!(run.outcome, PlanOutcome::Completed);
        assert_eq!(driving_on_day(&run, 1), hours(8));
        assert!(run.segments.iter().all(|s| s.note_str() != "30-Min Rest Break"));
        assert_eq!(driving_on_day(&run, 2), hours(1));
        let day_one: Duration = run
            .segments
            .iter()
            .filter(|s| s.day == 1)
            .map(|s| s.duration)
            .sum();
        assert_eq!(day_one, minutes(23 * 60 + 45));
    }

    #[test]
    fn test_every_segment_positive() {
        let rules = HosRules::default();
        for trip_hours in [0, 1, 7, 8, 13, 30, 75, 150] {
            for cycle in [0, 12, 55, 69] {
                let run = Scheduler::new(&rules).run(hours(trip_hours), hours(cycle));
                assert!(run.segments.iter().all(|s| !s.duration.is_zero()));
                assert_eq!(run.outcome, PlanOutcome::Completed);
            }
        }
    }
}
