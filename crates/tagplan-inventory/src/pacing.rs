//! Request pacing for inventory calls

use crate::error::{Error, Result};
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

/// Default pace: ten calls per second, one every 100ms.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Rate limiter shared by all calls of one collector
pub type InventoryRateLimiter = Arc<
    RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

/// Spaces out inventory calls so batch lookups stay under provider limits.
///
/// Calls are evenly spaced with no burst: at 10 per second, one every 100ms.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    limiter: InventoryRateLimiter,
    requests_per_second: u32,
}

impl RequestPacer {
    /// # Errors
    ///
    /// Returns [`Error::InvalidRateLimit`] when `requests_per_second` is zero.
    pub fn per_second(requests_per_second: u32) -> Result<Self> {
        if requests_per_second == 0 {
            return Err(Error::InvalidRateLimit(requests_per_second));
        }
        let quota = Quota::with_period(Duration::from_secs(1) / requests_per_second)
            .ok_or(Error::InvalidRateLimit(requests_per_second))?;
        Ok(Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            requests_per_second,
        })
    }

    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second
    }

    /// Wait until the next call is allowed.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}
