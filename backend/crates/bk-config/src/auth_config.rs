use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TTL_SECS, DEFAULT_LEEWAY_SECS,
    DEFAULT_LOGIN_MAX_ATTEMPTS, DEFAULT_LOGIN_WINDOW_SECS, DEFAULT_REFRESH_TTL_SECS,
    MAX_ACCESS_TTL_SECS, MAX_LEEWAY_SECS, MAX_LOGIN_MAX_ATTEMPTS, MAX_LOGIN_WINDOW_SECS,
    MAX_REFRESH_TTL_SECS, MIN_ACCESS_TTL_SECS, MIN_JWT_SECRET_LENGTH, MIN_LOGIN_MAX_ATTEMPTS,
    MIN_LOGIN_WINDOW_SECS,
};

use serde::Deserialize;

/// Session token signing and login throttling
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret (minimum 32 characters)
    pub jwt_secret: Option<String>,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
    pub leeway_secs: u64,
    /// Login attempts allowed per email per window
    pub login_max_attempts: u32,
    pub login_window_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            leeway_secs: DEFAULT_LEEWAY_SECS,
            login_max_attempts: DEFAULT_LOGIN_MAX_ATTEMPTS,
            login_window_secs: DEFAULT_LOGIN_WINDOW_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set BK_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.chars().count() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if self.access_ttl_secs < MIN_ACCESS_TTL_SECS || self.access_ttl_secs > MAX_ACCESS_TTL_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.access_ttl_secs must be {}-{}, got {}",
                MIN_ACCESS_TTL_SECS, MAX_ACCESS_TTL_SECS, self.access_ttl_secs
            )));
        }

        if self.refresh_ttl_secs <= self.access_ttl_secs
            || self.refresh_ttl_secs > MAX_REFRESH_TTL_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.refresh_ttl_secs must be greater than access_ttl_secs ({}) and at most {}, got {}",
                self.access_ttl_secs, MAX_REFRESH_TTL_SECS, self.refresh_ttl_secs
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be at most {}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        if self.login_max_attempts < MIN_LOGIN_MAX_ATTEMPTS
            || self.login_max_attempts > MAX_LOGIN_MAX_ATTEMPTS
        {
            return Err(ConfigError::auth(format!(
                "auth.login_max_attempts must be {}-{}, got {}",
                MIN_LOGIN_MAX_ATTEMPTS, MAX_LOGIN_MAX_ATTEMPTS, self.login_max_attempts
            )));
        }

        if self.login_window_secs < MIN_LOGIN_WINDOW_SECS
            || self.login_window_secs > MAX_LOGIN_WINDOW_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.login_window_secs must be {}-{}, got {}",
                MIN_LOGIN_WINDOW_SECS, MAX_LOGIN_WINDOW_SECS, self.login_window_secs
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("login_max_attempts", &self.login_max_attempts)
            .field("login_window_secs", &self.login_window_secs)
            .finish()
    }
}
