//! Global call pacing.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Serializes the *starts* of outbound calls so that two consecutive starts are
/// at least `interval` apart.
///
/// Waiters queue on a fair mutex, so calls are released in the order they
/// asked. The lock is held only across the delay, never across the call
/// itself: call k+1 may start while call k is still in flight.
#[derive(Debug)]
pub struct CallPacer {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl CallPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits for this caller's slot and records it as the latest start.
    pub async fn pace(&self) {
        let mut last_start = self.last_start.lock().await;
        if let Some(previous) = *last_start {
            tokio::time::sleep_until(previous + self.interval).await;
        }
        *last_start = Some(Instant::now());
    }
}

impl Default for CallPacer {
    fn default() -> Self {
        Self::from_millis(100)
    }
}
