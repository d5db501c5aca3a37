use std::time::{Duration, Instant};

/// Politeness bookkeeping for a single host
///
/// Holds the completion time of the last request to the host and how many
/// requests the crawl has made to it. The rate limiter keeps one of these
/// per host behind its own mutex.
#[derive(Debug, Clone, Default)]
pub struct HostClock {
    /// Number of requests made to this host in the current crawl
    pub request_count: u32,

    /// When the last request to this host was released
    pub last_request_time: Option<Instant>,
}

impl HostClock {
    /// Creates a clock for a host that has not been contacted yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the time until the next request may be made
    ///
    /// Returns `None` if a request can be made now, or the remaining part of
    /// `interval` otherwise.
    pub fn time_until_next_request(&self, interval: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < interval {
            Some(interval - elapsed)
        } else {
            None
        }
    }

    /// Records that a request was released at `now`
    pub fn record_request(&mut self, now: Instant) {
        self.request_count = self.request_count.saturating_add(1);
        self.last_request_time = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(1000);

    #[test]
    fn test_new_host_clock() {
        let clock = HostClock::new();
        assert_eq!(clock.request_count, 0);
        assert!(clock.last_request_time.is_none());
        assert!(clock
            .time_until_next_request(INTERVAL, Instant::now())
            .is_none());
    }

    #[test]
    fn test_time_until_next_request() {
        let mut clock = HostClock::new();
        let now = Instant::now();
        clock.record_request(now);

        assert_eq!(
            clock.time_until_next_request(INTERVAL, now),
            Some(Duration::from_millis(1000))
        );

        let soon = now + Duration::from_millis(400);
        assert_eq!(
            clock.time_until_next_request(INTERVAL, soon),
            Some(Duration::from_millis(600))
        );

        let exactly = now + INTERVAL;
        assert!(clock.time_until_next_request(INTERVAL, exactly).is_none());

        let later = now + Duration::from_millis(1500);
        assert!(clock.time_until_next_request(INTERVAL, later).is_none());
    }

    #[test]
    fn test_clock_in_the_past_waits_full_interval() {
        let mut clock = HostClock::new();
        let now = Instant::now();
        clock.record_request(now + Duration::from_millis(50));

        // `now` is earlier than the recorded time; elapsed saturates to zero.
        assert_eq!(clock.time_until_next_request(INTERVAL, now), Some(INTERVAL));
    }

    #[test]
    fn test_record_request() {
        let mut clock = HostClock::new();
        let now = Instant::now();

        clock.record_request(now);
        assert_eq!(clock.request_count, 1);
        assert_eq!(clock.last_request_time, Some(now));

        let later = now + Duration::from_millis(10);
        clock.record_request(later);
        assert_eq!(clock.request_count, 2);
        assert_eq!(clock.last_request_time, Some(later));
    }
}
