use crate::{AuthError, LoginLimitConfig, Result as AuthErrorResult};

use bk_core::normalize_email;

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
};

/// Login throttle keyed by normalized email
pub struct LoginRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    config: LoginLimitConfig,
}

impl LoginRateLimiter {
    pub fn new(config: LoginLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_attempts).unwrap_or(NonZeroU32::MIN);
        // One attempt replenishes every window / max_attempts
        let period = Duration::from_secs(config.window_secs.max(1)) / burst.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Record one attempt for `email`, failing once its quota is spent
    #[track_caller]
    pub fn check(&self, email: &str) -> AuthErrorResult<()> {
        let key = normalize_email(email).unwrap_or_default();

        self.limiter
            .check_key(&key)
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_attempts,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Drop state for keys whose quota is fully replenished
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}
