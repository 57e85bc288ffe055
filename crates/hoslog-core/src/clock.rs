//! Duty clock: the regulatory counters for one planning run

use hoslog_config::HosRules;
use hoslog_util::as_hours_f64;
use std::time::Duration;

use crate::LOG_DAY;

/// Counters tracked against the hours-of-service limits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleState {
    /// Driving since the last daily reset
    pub daily_driving_used: Duration,
    /// Driving plus on-duty time since the last daily reset
    pub daily_on_duty_used: Duration,
    /// Time charged against the cycle budget since the last restart
    pub cycle_used: Duration,
    /// Miles since the last fueling stop
    pub distance_since_fuel: f64,
    /// Driving since the last rest break or daily reset
    pub driving_since_break: Duration,
    /// Everything logged on the current day so far
    pub day_elapsed: Duration,
}

/// Owns the counters of a single planning run and answers capacity queries.
///
/// Created once per run, seeded with the cycle hours the driver has already
/// used, and mutated only by the scheduler.
#[derive(Debug, Clone)]
pub struct DutyClock<'a> {
    rules: &'a HosRules,
    day: u32,
    state: CycleState,
    total_driving: Duration,
    total_distance: f64,
}

impl<'a> DutyClock<'a> {
    /// Start on day 1 with `cycle_used` already charged (capped at the limit)
    pub fn new(rules: &'a HosRules, cycle_used: Duration) -> Self {
        Self {
            rules,
            day: 1,
            state: CycleState {
                cycle_used: cycle_used.min(rules.cycle_limit),
                ..Default::default()
            },
            total_driving: Duration::ZERO,
            total_distance: 0.0,
        }
    }

    pub fn rules(&self) -> &HosRules {
        self.rules
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// Driving time applied over the whole run
    pub fn total_driving(&self) -> Duration {
        self.total_driving
    }

    /// Miles driven over the whole run
    pub fn total_distance_miles(&self) -> f64 {
        self.total_distance
    }

    /// Cycle budget left; zero once the limit is reached
    pub fn remaining_cycle(&self) -> Duration {
        self.rules.cycle_limit.saturating_sub(self.state.cycle_used)
    }

    pub fn remaining_daily_driving(&self) -> Duration {
        self.rules
            .max_daily_driving
            .saturating_sub(self.state.daily_driving_used)
    }

    pub fn remaining_daily_on_duty(&self) -> Duration {
        self.rules
            .max_daily_on_duty
            .saturating_sub(self.state.daily_on_duty_used)
    }

    pub fn apply_driving(&mut self, duration: Duration) {
        let miles = as_hours_f64(duration) * self.rules.average_speed_mph;

        self.state.daily_driving_used += duration;
        self.state.daily_on_duty_used += duration;
        self.state.driving_since_break += duration;
        self.state.distance_since_fuel += miles;
        self.state.day_elapsed += duration;
        self.charge_cycle(duration);

        self.total_driving += duration;
        self.total_distance += miles;
    }

    pub fn apply_on_duty(&mut self, duration: Duration) {
        self.state.daily_on_duty_used += duration;
        self.state.day_elapsed += duration;
        self.charge_cycle(duration);
    }

    /// Off-duty time still draws on the cycle budget in this model
    pub fn apply_off_duty(&mut self, duration: Duration) {
        self.state.day_elapsed += duration;
        self.charge_cycle(duration);
    }

    // Saturates: a daily reset cannot be shortened, but it must not push the
    // counter past the limit either.
    fn charge_cycle(&mut self, duration: Duration) {
        self.state.cycle_used = (self.state.cycle_used + duration).min(self.rules.cycle_limit);
    }

    /// Start a new duty day
    pub fn rollover_day(&mut self) {
        self.state.daily_driving_used = Duration::ZERO;
        self.state.daily_on_duty_used = Duration::ZERO;
        self.state.driving_since_break = Duration::ZERO;
        self.state.day_elapsed = Duration::ZERO;
        self.day += 1;
    }

    /// Cycle restart: clears the cycle budget and starts a new day
    pub fn reset_cycle(&mut self) {
        self.state.cycle_used = Duration::ZERO;
        self.rollover_day();
    }

    pub fn reset_fuel(&mut self) {
        self.state.distance_since_fuel = 0.0;
    }

    pub fn reset_break(&mut self) {
        self.state.driving_since_break = Duration::ZERO;
    }

    pub fn needs_fuel(&self) -> bool {
        self.state.distance_since_fuel >= self.rules.fuel_interval_miles
    }

    pub fn needs_break(&self) -> bool {
        self.state.driving_since_break >= self.rules.driving_before_break
    }

    /// Time still loggable today while leaving room for the daily reset,
    /// so that no day holds more than 24 hours
    pub fn remaining_day(&self) -> Duration {
        LOG_DAY
            .saturating_sub(self.rules.daily_reset)
            .saturating_sub(self.state.day_elapsed)
    }

    /// Either daily cap, or the room left in the day, is used up
    pub fn daily_limit_reached(&self) -> bool {
        self.remaining_daily_driving().is_zero()
            || self.remaining_daily_on_duty().is_zero()
            || self.remaining_day().is_zero()
    }
}
