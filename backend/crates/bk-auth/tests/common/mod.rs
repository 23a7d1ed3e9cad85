#![allow(dead_code)]

use bk_auth::{Argon2Hasher, HasherConfig, IdentityResolver, PasswordHasher, ResolverConfig};
use bk_core::{ExternalProfile, LocalRegistration, LoginAttempt, Provider};
use bk_db::{IdentityStore, SqliteIdentityStore, connect, connect_in_memory};

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

/// Cheap Argon2 parameters so tests stay fast
pub fn test_hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(
        Argon2Hasher::new(HasherConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher"),
    )
}

pub async fn create_test_store() -> Arc<SqliteIdentityStore> {
    let pool = connect_in_memory()
        .await
        .expect("Failed to create test pool");
    Arc::new(SqliteIdentityStore::new(pool))
}

/// File-backed store for tests that race writers. Keep the TempDir alive.
pub async fn create_shared_test_store() -> (TempDir, Arc<SqliteIdentityStore>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = connect(&dir.path().join("identity.db"), 8)
        .await
        .expect("Failed to create shared pool");
    (dir, Arc::new(SqliteIdentityStore::new(pool)))
}

pub fn create_test_resolver(store: Arc<dyn IdentityStore>) -> IdentityResolver {
    IdentityResolver::new(store, test_hasher(), ResolverConfig { max_attempts: 3 })
}

pub fn local_attempt(email: &str, password: &str, display_name: &str) -> LoginAttempt {
    LoginAttempt::Local(LocalRegistration {
        email: email.to_string(),
        password: password.to_string(),
        display_name: display_name.to_string(),
        phone: None,
    })
}

pub fn external_profile(
    provider: Provider,
    provider_id: &str,
    email: Option<&str>,
    picture: Option<&str>,
) -> ExternalProfile {
    ExternalProfile {
        provider,
        provider_id: provider_id.to_string(),
        emails: email.map(|e| vec![e.to_string()]).unwrap_or_default(),
        display_name: Some("Social User".to_string()),
        picture: picture.map(str::to_string),
        raw_payload: json!({ "id": provider_id, "picture": picture }),
    }
}

pub fn external_attempt(
    provider: Provider,
    provider_id: &str,
    email: Option<&str>,
    picture: Option<&str>,
) -> LoginAttempt {
    LoginAttempt::External(external_profile(provider, provider_id, email, picture))
}
