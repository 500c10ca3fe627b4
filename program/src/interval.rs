// interval.rs - Named interval timers checked against a per-frame logical clock

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval `{0}` must have a non-zero period")]
    ZeroPeriod(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub period: Duration,
    pub last_fired: Duration,
    pub periodic: bool,
    pub fired_count: u64,
}

/// Timers keyed by name. Time only moves when the harness calls
/// [`IntervalScheduler::advance_to`], once per frame.
#[derive(Debug, Default, Clone)]
pub struct IntervalScheduler {
    now: Duration,
    intervals: HashMap<String, Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves logical time forward. Earlier timestamps are ignored.
    pub fn advance_to(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Registers or replaces `name`, anchored at the current logical time.
    pub fn set_interval(
        &mut self,
        name: impl Into<String>,
        period: Duration,
        periodic: bool,
    ) -> Result<(), IntervalError> {
        let name = name.into();
        if period.is_zero() {
            return Err(IntervalError::ZeroPeriod(name));
        }
        self.intervals.insert(
            name,
            Interval { period, last_fired: self.now, periodic, fired_count: 0 },
        );
        Ok(())
    }

    /// True once the period has elapsed since the last firing. Firing resets
    /// the anchor; one-shot intervals are removed instead.
    pub fn check_interval(&mut self, name: &str) -> bool {
        let Some(interval) = self.intervals.get_mut(name) else {
            return false;
        };
        if self.now.saturating_sub(interval.last_fired) < interval.period {
            return false;
        }
        if interval.periodic {
            interval.last_fired = self.now;
            interval.fired_count += 1;
        } else {
            self.intervals.remove(name);
        }
        true
    }

    pub fn interval_count(&self, name: &str) -> Option<u64> {
        self.intervals.get(name).map(|interval| interval.fired_count)
    }

    pub fn get(&self, name: &str) -> Option<&Interval> {
        self.intervals.get(name)
    }
}
