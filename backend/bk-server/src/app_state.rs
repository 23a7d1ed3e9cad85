use crate::Metrics;
use crate::error::Result as ServerErrorResult;

use bk_auth::{
    Argon2Hasher, CredentialVerifier, HasherConfig, IdentityResolver, LoginLimitConfig,
    LoginRateLimiter, PasswordHasher, ResolverConfig, TokenConfig, TokenService,
};
use bk_config::{Config, FrontendConfig};
use bk_db::IdentityStore;

use std::sync::Arc;

/// Shared, read-only services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IdentityStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub resolver: Arc<IdentityResolver>,
    pub verifier: Arc<CredentialVerifier>,
    pub tokens: Arc<TokenService>,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub frontend: FrontendConfig,
    pub metrics: Metrics,
}

/// Settings for the services inside [`AppState`]
#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    pub token: TokenConfig,
    pub login_limit: LoginLimitConfig,
    pub resolver: ResolverConfig,
    pub frontend: FrontendConfig,
}

impl ServiceSettings {
    /// Convert validated configuration sections into service settings
    pub fn from_config(config: &Config) -> Self {
        Self {
            token: TokenConfig {
                secret: config.auth.jwt_secret.clone().unwrap_or_default(),
                access_ttl_secs: config.auth.access_ttl_secs,
                refresh_ttl_secs: config.auth.refresh_ttl_secs,
                leeway_secs: config.auth.leeway_secs,
            },
            login_limit: LoginLimitConfig {
                max_attempts: config.auth.login_max_attempts,
                window_secs: config.auth.login_window_secs,
            },
            resolver: ResolverConfig {
                max_attempts: config.resolver.max_attempts,
            },
            frontend: config.frontend.clone(),
        }
    }
}

impl AppState {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        hasher: Arc<dyn PasswordHasher>,
        settings: ServiceSettings,
    ) -> Self {
        let resolver = IdentityResolver::new(store.clone(), hasher.clone(), settings.resolver);
        let verifier = CredentialVerifier::new(store.clone(), hasher.clone());

        Self {
            store,
            hasher,
            resolver: Arc::new(resolver),
            verifier: Arc::new(verifier),
            tokens: Arc::new(TokenService::new(&settings.token)),
            login_limiter: Arc::new(LoginRateLimiter::new(settings.login_limit)),
            frontend: settings.frontend,
            metrics: Metrics::new(),
        }
    }

    /// Build every service from a validated [`Config`]
    #[track_caller]
    pub fn from_config(store: Arc<dyn IdentityStore>, config: &Config) -> ServerErrorResult<Self> {
        let hasher = Argon2Hasher::new(HasherConfig {
            memory_kib: config.password.memory_kib,
            iterations: config.password.iterations,
            parallelism: config.password.parallelism,
        })?;

        Ok(Self::new(
            store,
            Arc::new(hasher),
            ServiceSettings::from_config(config),
        ))
    }
}
