use chrono::{TimeDelta, Utc};
use hermes_core::Timestamp;
use hermes_ports::Clock;
use std::sync::Mutex;

/// Clock that stands still until advanced
///
/// Used where arrival order must be reproducible: each call to [`tick`]
/// moves time forward by the configured step.
///
/// [`tick`]: ManualClock::tick
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
    step: TimeDelta,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
            step: TimeDelta::milliseconds(1),
        }
    }

    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Change the amount `tick` advances by
    pub fn with_step(mut self, step: TimeDelta) -> Self {
        self.step = step;
        self
    }

    pub fn advance(&self, duration: TimeDelta) {
        let mut current = self.lock();
        *current += duration;
    }

    /// Advance by one step and return the new time
    pub fn tick(&self) -> Timestamp {
        let mut current = self.lock();
        *current += self.step;
        *current
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timestamp> {
        // A poisoned guard still holds a valid timestamp
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.lock()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
