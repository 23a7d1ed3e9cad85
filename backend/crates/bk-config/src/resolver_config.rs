use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_RESOLVER_MAX_ATTEMPTS, MAX_RESOLVER_MAX_ATTEMPTS,
    MIN_RESOLVER_MAX_ATTEMPTS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Rounds an external login may retry after a storage conflict
    pub max_attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RESOLVER_MAX_ATTEMPTS,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_RESOLVER_MAX_ATTEMPTS
            || self.max_attempts > MAX_RESOLVER_MAX_ATTEMPTS
        {
            return Err(ConfigError::config(format!(
                "resolver.max_attempts must be {}-{}, got {}",
                MIN_RESOLVER_MAX_ATTEMPTS, MAX_RESOLVER_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        Ok(())
    }
}
