//! Randomized pause between consecutive tickers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::ValidationError;

/// Uniform random delay in `[min, max]`, skipped before the first request.
#[derive(Debug)]
pub struct PolitenessDelay {
    min: Duration,
    max: Duration,
    started: AtomicBool,
}

impl PolitenessDelay {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::InvalidDelayRange {
                min_ms: duration_ms(min),
                max_ms: duration_ms(max),
            });
        }
        Ok(Self {
            min,
            max,
            started: AtomicBool::new(false),
        })
    }

    pub fn disabled() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
            started: AtomicBool::new(false),
        }
    }

    pub const fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }

    /// Delay to apply before the next ticker. Zero on the first call.
    pub fn next_delay(&self) -> Duration {
        if !self.started.swap(true, Ordering::SeqCst) {
            return Duration::ZERO;
        }
        let millis = fastrand::u64(duration_ms(self.min)..=duration_ms(self.max));
        Duration::from_millis(millis)
    }

    pub async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!(delay_ms = duration_ms(delay), "politeness delay");
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for PolitenessDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(2_000),
            max: Duration::from_millis(4_000),
            started: AtomicBool::new(false),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
