use std::time::{
    Duration,
    Instant,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Fixed-interval timer for the status poll.
///
/// Fires on the first check and then whenever a full interval has passed since
/// the previous firing. It never stops and has no backoff; request outcomes do
/// not feed back into it.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl PollSchedule {
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(Duration::from_millis(100)), last_fired: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(100));
    }

    /// Returns true (and records the firing) when a poll should go out at `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        let due = match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };

        if due {
            self.last_fired = Some(now);
        }

        due
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last_fired {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_immediately_then_every_interval() {
        let start = Instant::now();
        let mut schedule = PollSchedule::default();

        assert!(schedule.due(start));
        assert!(!schedule.due(start + Duration::from_millis(1500)));
        assert!(!schedule.due(start + Duration::from_millis(2999)));
        assert!(schedule.due(start + Duration::from_secs(3)));
        assert!(!schedule.due(start + Duration::from_secs(4)));
        assert!(schedule.due(start + Duration::from_secs(6)));
    }

    #[test]
    fn keeps_firing_for_a_long_session() {
        let start = Instant::now();
        let mut schedule = PollSchedule::default();

        let fired = (0..=600)
            .map(|tick| start + Duration::from_millis(100 * tick))
            .filter(|now| schedule.due(*now))
            .count();

        // 60 seconds at a 3 second interval, plus the startup poll.
        assert_eq!(fired, 21);
    }

    #[test]
    fn a_late_frame_does_not_cause_a_burst() {
        let start = Instant::now();
        let mut schedule = PollSchedule::default();
        schedule.due(start);

        assert!(schedule.due(start + Duration::from_secs(10)));
        assert!(!schedule.due(start + Duration::from_secs(11)));
        assert_eq!(schedule.until_next(start + Duration::from_secs(11)), Duration::from_secs(2));
    }

    #[test]
    fn reports_time_until_next_poll() {
        let start = Instant::now();
        let mut schedule = PollSchedule::new(Duration::from_secs(5));
        assert_eq!(schedule.until_next(start), Duration::ZERO);

        schedule.due(start);
        assert_eq!(schedule.until_next(start + Duration::from_secs(2)), Duration::from_secs(3));
        assert_eq!(schedule.until_next(start + Duration::from_secs(9)), Duration::ZERO);
    }
}
