//! Fixed-period sweep scheduling
//!
//! The browser's timer calls in with the current time; the schedule says
//! whether a sweep is due and advances itself when it is.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_SWEEP_INTERVAL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct SweepSchedule {
    interval: Duration,
    next_due: DateTime<Utc>,
}

impl SweepSchedule {
    pub fn new(interval: Duration, start: DateTime<Utc>) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> DateTime<Utc> {
        self.next_due
    }

    /// True once per elapsed interval. Missed intervals collapse into one.
    pub fn due(&mut self, now: DateTime<Utc>) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due = now + self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_due_once_per_interval() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let mut schedule = SweepSchedule::new(Duration::hours(1), start);

        assert!(!schedule.due(start + Duration::minutes(59)));
        assert!(schedule.due(start + Duration::minutes(60)));
        assert!(!schedule.due(start + Duration::minutes(61)));
        assert_eq!(schedule.next_due(), start + Duration::minutes(120));
    }

    #[test]
    fn test_missed_intervals_collapse() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let mut schedule = SweepSchedule::new(Duration::hours(1), start);

        let late = start + Duration::hours(5);
        assert!(schedule.due(late));
        assert!(!schedule.due(late + Duration::minutes(30)));
    }
}
