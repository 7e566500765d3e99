//! Pause between repositories

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Policy applied after each successfully collected repository.
pub trait CourtesyDelay {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Pause used when no other delay is configured
pub const DEFAULT_COURTESY_DELAY: Duration = Duration::from_millis(100);

/// Sleep for a fixed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_COURTESY_DELAY)
    }
}

impl CourtesyDelay for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            sleep(self.0).await;
        }
    }
}

/// Never pause. For tests and offline replays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl CourtesyDelay for NoDelay {
    async fn pause(&self) {}
}
