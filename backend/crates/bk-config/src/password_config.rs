use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PASSWORD_ITERATIONS, DEFAULT_PASSWORD_MEMORY_KIB,
    DEFAULT_PASSWORD_PARALLELISM, MAX_PASSWORD_ITERATIONS, MAX_PASSWORD_MEMORY_KIB,
    MAX_PASSWORD_PARALLELISM, MIN_PASSWORD_ITERATIONS, MIN_PASSWORD_PARALLELISM,
};

use serde::Deserialize;

/// Argon2id cost parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_PASSWORD_MEMORY_KIB,
            iterations: DEFAULT_PASSWORD_ITERATIONS,
            parallelism: DEFAULT_PASSWORD_PARALLELISM,
        }
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.parallelism < MIN_PASSWORD_PARALLELISM || self.parallelism > MAX_PASSWORD_PARALLELISM
        {
            return Err(ConfigError::password(format!(
                "password.parallelism must be {}-{}, got {}",
                MIN_PASSWORD_PARALLELISM, MAX_PASSWORD_PARALLELISM, self.parallelism
            )));
        }

        // Argon2 needs at least 8 KiB per lane
        let min_memory = 8 * self.parallelism;
        if self.memory_kib < min_memory || self.memory_kib > MAX_PASSWORD_MEMORY_KIB {
            return Err(ConfigError::password(format!(
                "password.memory_kib must be {}-{}, got {}",
                min_memory, MAX_PASSWORD_MEMORY_KIB, self.memory_kib
            )));
        }

        if self.iterations < MIN_PASSWORD_ITERATIONS || self.iterations > MAX_PASSWORD_ITERATIONS {
            return Err(ConfigError::password(format!(
                "password.iterations must be {}-{}, got {}",
                MIN_PASSWORD_ITERATIONS, MAX_PASSWORD_ITERATIONS, self.iterations
            )));
        }

        Ok(())
    }
}
