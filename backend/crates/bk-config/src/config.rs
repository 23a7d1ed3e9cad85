use crate::{
    AuthConfig, BootstrapConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, DatabaseConfig, FrontendConfig, LoggingConfig, PasswordConfig,
    ResolverConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub password: PasswordConfig,
    pub resolver: ResolverConfig,
    pub frontend: FrontendConfig,
    pub bootstrap: BootstrapConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. BK_CONFIG_DIR env var, else ./.bk/
    /// 2. Auto-create the config directory
    /// 3. config.toml if it exists, else defaults
    /// 4. BK_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: BK_CONFIG_DIR env var > ./.bk/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate every section. Call once at startup, after load().
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.password.validate()?;
        self.resolver.validate()?;
        self.frontend.validate()?;
        self.bootstrap.validate()?;

        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (never logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (timeout {}s, cors: {})",
            self.server.host,
            self.server.port,
            self.server.request_timeout_secs,
            if self.server.cors_allowed_origins.is_empty() {
                "any origin".to_string()
            } else {
                self.server.cors_allowed_origins.join(", ")
            }
        );
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  auth: HS256 secret {}, access={}, refresh={}, leeway={}s",
            if self.auth.jwt_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            humantime::format_duration(std::time::Duration::from_secs(self.auth.access_ttl_secs)),
            humantime::format_duration(std::time::Duration::from_secs(self.auth.refresh_ttl_secs)),
            self.auth.leeway_secs
        );
        info!(
            "  login limit: {}/{}s per email",
            self.auth.login_max_attempts, self.auth.login_window_secs
        );
        info!(
            "  password: argon2id m={}KiB t={} p={}",
            self.password.memory_kib, self.password.iterations, self.password.parallelism
        );
        info!("  resolver: max_attempts={}", self.resolver.max_attempts);
        info!(
            "  frontend: login={}, failure={}",
            self.frontend.login_redirect, self.frontend.failure_redirect
        );
        match &self.bootstrap.email {
            Some(email) => info!("  bootstrap admin: {}", email),
            None => info!("  bootstrap admin: none"),
        }
        info!(
            "  logging: {} ({})",
            *self.logging.level,
            match &self.logging.file {
                Some(file) => file.clone(),
                None if self.logging.colored => "stdout, colored".to_string(),
                None => "stdout".to_string(),
            }
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("BK_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("BK_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "BK_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );
        Self::apply_env_list(
            "BK_SERVER_CORS_ALLOWED_ORIGINS",
            &mut self.server.cors_allowed_origins,
        );

        // Database
        Self::apply_env_string("BK_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "BK_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("BK_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_duration("BK_AUTH_ACCESS_TTL", &mut self.auth.access_ttl_secs);
        Self::apply_env_duration("BK_AUTH_REFRESH_TTL", &mut self.auth.refresh_ttl_secs);
        Self::apply_env_parse("BK_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);
        Self::apply_env_parse(
            "BK_AUTH_LOGIN_MAX_ATTEMPTS",
            &mut self.auth.login_max_attempts,
        );
        Self::apply_env_parse(
            "BK_AUTH_LOGIN_WINDOW_SECS",
            &mut self.auth.login_window_secs,
        );

        // Password
        Self::apply_env_parse("BK_PASSWORD_MEMORY_KIB", &mut self.password.memory_kib);
        Self::apply_env_parse("BK_PASSWORD_ITERATIONS", &mut self.password.iterations);
        Self::apply_env_parse("BK_PASSWORD_PARALLELISM", &mut self.password.parallelism);

        // Resolver
        Self::apply_env_parse(
            "BK_RESOLVER_MAX_ATTEMPTS",
            &mut self.resolver.max_attempts,
        );

        // Frontend
        Self::apply_env_string(
            "BK_FRONTEND_LOGIN_REDIRECT",
            &mut self.frontend.login_redirect,
        );
        Self::apply_env_string(
            "BK_FRONTEND_FAILURE_REDIRECT",
            &mut self.frontend.failure_redirect,
        );

        // Bootstrap
        Self::apply_env_option_string("BK_BOOTSTRAP_EMAIL", &mut self.bootstrap.email);
        Self::apply_env_option_string("BK_BOOTSTRAP_PASSWORD", &mut self.bootstrap.password);
        Self::apply_env_string(
            "BK_BOOTSTRAP_DISPLAY_NAME",
            &mut self.bootstrap.display_name,
        );

        // Logging
        Self::apply_env_parse("BK_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("BK_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("BK_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Comma-separated list, blanks dropped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    /// Plain seconds ("3600") or a humantime duration ("1h", "90m")
    fn apply_env_duration(var_name: &str, target_secs: &mut u64) {
        if let Ok(val) = std::env::var(var_name) {
            let val = val.trim();
            if let Ok(secs) = val.parse::<u64>() {
                *target_secs = secs;
            } else if let Ok(duration) = humantime::parse_duration(val) {
                *target_secs = duration.as_secs();
            }
        }
    }
}
