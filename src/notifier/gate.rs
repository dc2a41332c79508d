use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps consecutive publishes at least `interval` apart.
pub struct MinIntervalGate {
    interval: Duration,
    last: Option<Instant>,
}

impl MinIntervalGate {
    pub fn new(interval: Duration) -> Self {
        MinIntervalGate {
            interval,
            last: None,
        }
    }

    /// Returns immediately until the first `mark`.
    pub async fn wait(&self) {
        let Some(last) = self.last else {
            return;
        };

        let ready = last + self.interval;
        if ready > Instant::now() {
            log::debug!(
                "waiting {:?} before the next publish",
                ready - Instant::now()
            );
            sleep_until(ready).await;
        }
    }

    pub fn mark(&mut self) {
        self.last = Some(Instant::now());
    }
}
