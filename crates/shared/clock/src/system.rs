use chrono::{DurationRound, TimeDelta, Utc};
use hermes_core::Timestamp;
use hermes_ports::Clock;

/// Wall-clock time, truncated to whole microseconds
///
/// Microsecond resolution is what relational timestamp columns keep, so an
/// order's `created_at` reads back exactly as it was written.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = Utc::now();
        now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use std::thread;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let time1 = clock.now();
        thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        assert!(time2 > time1);
        assert!(time2 - time1 >= TimeDelta::milliseconds(9));
    }

    #[test]
    fn test_microsecond_resolution() {
        let now = SystemClock::new().now();
        assert_eq!(now.nanosecond() % 1_000, 0);
    }
}
