use std::time::Duration;

use metrics::{counter, histogram};

/// Counters for authentication traffic. Nothing is exported unless the host
/// process installs a recorder.
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "bk_auth" }
    }

    /// `method` is `local` or a provider name
    pub fn login_succeeded(&self, method: &str) {
        counter!(format!("{}.logins.succeeded", self.prefix)).increment(1);
        counter!(format!("{}.logins.succeeded.{}", self.prefix, method)).increment(1);
    }

    pub fn login_failed(&self, method: &str) {
        counter!(format!("{}.logins.failed", self.prefix)).increment(1);
        counter!(format!("{}.logins.failed.{}", self.prefix, method)).increment(1);
    }

    pub fn registration_succeeded(&self) {
        counter!(format!("{}.registrations.succeeded", self.prefix)).increment(1);
    }

    pub fn registration_failed(&self) {
        counter!(format!("{}.registrations.failed", self.prefix)).increment(1);
    }

    pub fn token_refreshed(&self) {
        counter!(format!("{}.tokens.refreshed", self.prefix)).increment(1);
    }

    /// `code` is the client-facing error code
    pub fn error_occurred(&self, code: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, code.to_lowercase())).increment(1);
    }

    /// Time spent resolving a login to an account
    pub fn resolve_latency(&self, duration: Duration) {
        histogram!(format!("{}.resolve.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
