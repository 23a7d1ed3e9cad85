//! Password hashing capability.
//!
//! Digests are Argon2id PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`),
//! so the cost parameters travel with each digest and can be raised later
//! without invalidating stored passwords.

use crate::{AuthError, HasherConfig, Result as AuthErrorResult};

use std::panic::Location;
use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use error_location::ErrorLocation;

pub trait PasswordHasher: Send + Sync {
    /// Hash `secret` with a fresh random salt
    fn hash(&self, secret: &str) -> AuthErrorResult<String>;

    /// Compare `secret` against a stored digest. A digest that cannot be
    /// parsed is an error, a mismatch is `Ok(false)`.
    fn verify(&self, secret: &str, digest: &str) -> AuthErrorResult<bool>;
}

#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    #[track_caller]
    pub fn new(config: HasherConfig) -> AuthErrorResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::PasswordHash {
            message: format!("Invalid Argon2 parameters: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2Hasher {
    #[track_caller]
    fn hash(&self, secret: &str) -> AuthErrorResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHash {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        Ok(digest.to_string())
    }

    #[track_caller]
    fn verify(&self, secret: &str, digest: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(digest).map_err(|e| AuthError::PasswordHash {
            message: format!("Unreadable password digest: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(self
            .argon2
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Run [`PasswordHasher::hash`] on the blocking pool
pub async fn hash_blocking(
    hasher: Arc<dyn PasswordHasher>,
    secret: String,
) -> AuthErrorResult<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&secret))
        .await
        .map_err(|e| AuthError::PasswordHash {
            message: format!("Hashing task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
}

/// Run [`PasswordHasher::verify`] on the blocking pool
pub async fn verify_blocking(
    hasher: Arc<dyn PasswordHasher>,
    secret: String,
    digest: String,
) -> AuthErrorResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&secret, &digest))
        .await
        .map_err(|e| AuthError::PasswordHash {
            message: format!("Verification task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
}
