//! Randomized pacing between page interactions
//!
//! Every interaction that risks anti-automation detection is spaced by a
//! uniform random delay drawn from the configured range.

use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Produces randomized wait durations within a configured range of seconds.
#[derive(Debug, Clone, Copy)]
pub struct DelayPolicy {
    min_secs: f64,
    max_secs: f64,
}

impl DelayPolicy {
    /// Invariant (validated at config build time): `0 <= min <= max`.
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Draw one wait duration from the range.
    pub fn jitter(&self) -> Duration {
        if self.max_secs <= self.min_secs {
            return Duration::from_secs_f64(self.min_secs);
        }
        let secs = rand::rng().random_range(self.min_secs..=self.max_secs);
        Duration::from_secs_f64(secs)
    }

    /// Sleep for one jittered interval.
    pub async fn pause(&self) {
        let wait = self.jitter();
        debug!("Pausing {:.2}s between interactions", wait.as_secs_f64());
        tokio::time::sleep(wait).await;
    }
}
