/// Per-email login throttling
#[derive(Debug, Clone)]
pub struct LoginLimitConfig {
    /// Attempts allowed per window for one email
    pub max_attempts: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for LoginLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_secs: 60,
        }
    }
}
