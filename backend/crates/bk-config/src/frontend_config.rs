use crate::{ConfigError, ConfigErrorResult, DEFAULT_FAILURE_REDIRECT, DEFAULT_LOGIN_REDIRECT};

use serde::Deserialize;

/// Where the provider callback sends the browser
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Receives `?token=..&refreshToken=..` after a social login
    pub login_redirect: String,
    /// Receives `?error=CODE` when a social login fails
    pub failure_redirect: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            login_redirect: String::from(DEFAULT_LOGIN_REDIRECT),
            failure_redirect: String::from(DEFAULT_FAILURE_REDIRECT),
        }
    }
}

impl FrontendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.login_redirect.trim().is_empty() {
            return Err(ConfigError::frontend(
                "frontend.login_redirect cannot be empty",
            ));
        }

        if self.failure_redirect.trim().is_empty() {
            return Err(ConfigError::frontend(
                "frontend.failure_redirect cannot be empty",
            ));
        }

        Ok(())
    }
}
