use std::time::Duration;
use tokio::time::Instant;

/// Rate guard that admits at most one call per interval.
///
/// The window starts when a call is admitted, whatever the call's outcome.
/// Uses tokio's clock so paused-time tests can move it.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_invoked: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_invoked: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true and starts a new window if the previous one has elapsed.
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_invoked {
            if now.duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_invoked = Some(now);
        true
    }
}
