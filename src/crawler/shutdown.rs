//! Crawl-wide stop flag that also wakes sleeping threads and tasks

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

/// A cloneable stop signal for blocking waits
///
/// Politeness delays sleep on this signal instead of `thread::sleep`, so
/// triggering it releases every pending wait at once and shutdown is never
/// held up by a host's interval. Async callers race their work against
/// [`triggered`](Self::triggered) for the same effect.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
    updates: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        let (updates, _) = watch::channel(false);
        Self {
            inner: Arc::default(),
            updates: Arc::new(updates),
        }
    }
}

impl ShutdownSignal {
    /// Creates an untriggered signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers the signal and wakes all sleepers; triggering is permanent
    pub fn trigger(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
        self.updates.send_replace(true);
    }

    /// Returns true once the signal has been triggered
    pub fn is_triggered(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleeps for `timeout` unless the signal fires first
    ///
    /// Returns `true` if the sleep was cut short (or the signal was already
    /// triggered), `false` if the full timeout elapsed.
    pub fn sleep(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |triggered| !*triggered)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }

    /// Resolves once the signal has been triggered
    pub async fn triggered(&self) {
        let mut updates = self.updates.subscribe();
        // The sender lives as long as `self`, so this only ends on trigger
        let _ = updates.wait_for(|triggered| *triggered).await;
    }
}
