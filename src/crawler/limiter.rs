//! Per-host politeness
//!
//! Each host gets its own [`HostClock`] behind its own mutex. The mutex is
//! held across the check, the sleep, and the timestamp update, so two
//! workers hitting the same host are released one interval apart, while
//! workers on different hosts never wait on each other.

use crate::crawler::shutdown::ShutdownSignal;
use crate::state::HostClock;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default minimum spacing between requests to one host
pub const POLITE_INTERVAL: Duration = Duration::from_secs(1);

/// How a polite wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The interval has elapsed; the caller may proceed
    Ready,
    /// The crawl is shutting down; the wait was cut short or skipped
    Interrupted,
}

/// Blocking per-host rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    hosts: DashMap<String, Arc<Mutex<HostClock>>>,
    shutdown: ShutdownSignal,
}

impl RateLimiter {
    /// Creates a limiter spacing requests to each host by `interval`
    pub fn new(interval: Duration, shutdown: ShutdownSignal) -> Self {
        Self {
            interval,
            hosts: DashMap::new(),
            shutdown,
        }
    }

    /// Blocks until `host` may be contacted again, then stamps it
    ///
    /// If the host was stamped less than one interval ago, sleeps for the
    /// remainder. Whether or not it slept, the current time becomes the
    /// host's new timestamp. The sleep ends early when the shutdown signal
    /// fires; the timestamp is still recorded in that case.
    pub fn polite_wait(&self, host: &str) -> WaitOutcome {
        let slot = self.slot(host);
        let mut clock = slot.lock().unwrap_or_else(PoisonError::into_inner);

        let outcome = if self.shutdown.is_triggered() {
            WaitOutcome::Interrupted
        } else if let Some(wait) = clock.time_until_next_request(self.interval, Instant::now()) {
            tracing::debug!("Waiting {:?} before next request to {}", wait, host);
            if self.shutdown.sleep(wait) {
                WaitOutcome::Interrupted
            } else {
                WaitOutcome::Ready
            }
        } else {
            WaitOutcome::Ready
        };

        clock.record_request(Instant::now());
        outcome
    }

    /// Number of waits completed for `host`
    pub fn requests_to(&self, host: &str) -> u32 {
        self.hosts.get(host).map_or(0, |slot| {
            slot.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .request_count
        })
    }

    /// Number of distinct hosts contacted
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Looks up the host's clock, creating it on first contact
    ///
    /// The map shard is only locked for the lookup; callers lock the
    /// returned clock after the shard has been released.
    fn slot(&self, host: &str) -> Arc<Mutex<HostClock>> {
        if let Some(slot) = self.hosts.get(host) {
            return Arc::clone(&slot);
        }
        Arc::clone(&self.hosts.entry(host.to_string()).or_default())
    }
}
