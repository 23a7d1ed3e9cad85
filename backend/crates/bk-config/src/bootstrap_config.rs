use crate::{ConfigError, ConfigErrorResult, DEFAULT_BOOTSTRAP_DISPLAY_NAME};

use serde::Deserialize;

/// Administrator account ensured at startup
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            display_name: String::from(DEFAULT_BOOTSTRAP_DISPLAY_NAME),
        }
    }
}

impl BootstrapConfig {
    /// Email and password when both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => {
                if !email.contains('@') {
                    return Err(ConfigError::bootstrap(
                        "bootstrap.email must be an email address",
                    ));
                }
                if password.is_empty() {
                    return Err(ConfigError::bootstrap("bootstrap.password cannot be empty"));
                }
                if self.display_name.trim().is_empty() {
                    return Err(ConfigError::bootstrap(
                        "bootstrap.display_name cannot be empty",
                    ));
                }
                Ok(())
            }
            (None, None) => Ok(()),
            _ => Err(ConfigError::bootstrap(
                "bootstrap.email and bootstrap.password must be set together",
            )),
        }
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("display_name", &self.display_name)
            .finish()
    }
}
