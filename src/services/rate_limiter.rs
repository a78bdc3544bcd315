use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Jitter, Quota, RateLimiter};
use nonzero_ext::*;

/// Client-side throttle in front of the Groq API: a per-minute quota from
/// config plus a fixed per-second burst cap.
#[derive(Clone)]
pub struct ApiRateLimiter {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    burst_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ApiRateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(nonzero!(30u32));

        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));
        let burst_limiter = Arc::new(RateLimiter::direct(Quota::per_second(nonzero!(2u32))));

        Self {
            limiter,
            burst_limiter,
        }
    }

    pub async fn acquire(&self) {
        self.burst_limiter.until_ready().await;
        self.limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;
    }
}

impl Default for ApiRateLimiter {
    fn default() -> Self {
        Self::new(crate::config::constants::DEFAULT_REQUESTS_PER_MINUTE)
    }
}
