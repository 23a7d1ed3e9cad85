mod api;
mod bootstrap;

use crate::{AppState, ServiceSettings};

use bk_auth::{Argon2Hasher, HasherConfig, TokenConfig};
use bk_db::{SqliteIdentityStore, connect_in_memory};

use std::sync::Arc;

pub(crate) const TEST_SECRET: &str = "unit-test-secret-at-least-32-characters";

pub(crate) async fn create_test_state() -> AppState {
    let pool = connect_in_memory()
        .await
        .expect("Failed to create test pool");
    let hasher = Argon2Hasher::new(HasherConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build hasher");

    AppState::new(
        Arc::new(SqliteIdentityStore::new(pool)),
        Arc::new(hasher),
        ServiceSettings {
            token: TokenConfig {
                secret: TEST_SECRET.to_string(),
                ..TokenConfig::default()
            },
            ..ServiceSettings::default()
        },
    )
}
