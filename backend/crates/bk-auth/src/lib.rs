pub mod claims;
pub mod credential_verifier;
pub mod error;
pub mod hasher_config;
pub mod identity_resolver;
pub mod login_limit_config;
pub mod login_rate_limiter;
pub mod password_hasher;
pub mod provider_normalizer;
pub mod resolver_config;
pub mod token_config;
pub mod token_kind;
pub mod token_service;

pub use claims::Claims;
pub use credential_verifier::CredentialVerifier;
pub use error::{AuthError, Result};
pub use hasher_config::HasherConfig;
pub use identity_resolver::IdentityResolver;
pub use login_limit_config::LoginLimitConfig;
pub use login_rate_limiter::LoginRateLimiter;
pub use password_hasher::{Argon2Hasher, PasswordHasher};
pub use provider_normalizer::normalize;
pub use resolver_config::ResolverConfig;
pub use token_config::TokenConfig;
pub use token_kind::TokenKind;
pub use token_service::{TokenPair, TokenService};
