mod auth_config;
mod bootstrap_config;
mod config;
mod database_config;
mod error;
mod frontend_config;
mod log_level;
mod logging_config;
mod password_config;
mod resolver_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use bootstrap_config::BootstrapConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use frontend_config::FrontendConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use password_config::PasswordConfig;
pub use resolver_config::ResolverConfig;
pub use server_config::ServerConfig;

pub const CONFIG_DIR_ENV: &str = "BK_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".bk";
const CONFIG_FILENAME: &str = "config.toml";

// Server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4444;
const MIN_PORT: u16 = 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// Database
const DEFAULT_DATABASE_FILENAME: &str = "identity.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 8;
const MIN_DATABASE_MAX_CONNECTIONS: u32 = 1;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 64;

// Auth
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_ACCESS_TTL_SECS: u64 = 60 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 2 * 60 * 60;
const MIN_ACCESS_TTL_SECS: u64 = 1;
const MAX_ACCESS_TTL_SECS: u64 = 24 * 60 * 60;
const MAX_REFRESH_TTL_SECS: u64 = 90 * 24 * 60 * 60;
const DEFAULT_LEEWAY_SECS: u64 = 30;
const MAX_LEEWAY_SECS: u64 = 300;
const DEFAULT_LOGIN_MAX_ATTEMPTS: u32 = 5;
const MIN_LOGIN_MAX_ATTEMPTS: u32 = 1;
const MAX_LOGIN_MAX_ATTEMPTS: u32 = 1000;
const DEFAULT_LOGIN_WINDOW_SECS: u64 = 60;
const MIN_LOGIN_WINDOW_SECS: u64 = 1;
const MAX_LOGIN_WINDOW_SECS: u64 = 3600;

// Password hashing (Argon2id)
const DEFAULT_PASSWORD_MEMORY_KIB: u32 = 19 * 1024;
const MAX_PASSWORD_MEMORY_KIB: u32 = 1024 * 1024;
const DEFAULT_PASSWORD_ITERATIONS: u32 = 2;
const MIN_PASSWORD_ITERATIONS: u32 = 1;
const MAX_PASSWORD_ITERATIONS: u32 = 10;
const DEFAULT_PASSWORD_PARALLELISM: u32 = 1;
const MIN_PASSWORD_PARALLELISM: u32 = 1;
const MAX_PASSWORD_PARALLELISM: u32 = 16;

// Resolver
const DEFAULT_RESOLVER_MAX_ATTEMPTS: u32 = 3;
const MIN_RESOLVER_MAX_ATTEMPTS: u32 = 1;
const MAX_RESOLVER_MAX_ATTEMPTS: u32 = 10;

// Frontend
const DEFAULT_LOGIN_REDIRECT: &str = "http://localhost:4200/auth/login";
const DEFAULT_FAILURE_REDIRECT: &str = "http://localhost:4200/auth/login";

// Bootstrap
const DEFAULT_BOOTSTRAP_DISPLAY_NAME: &str = "Administrator";

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
