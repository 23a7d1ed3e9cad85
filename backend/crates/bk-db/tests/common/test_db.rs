use bk_db::{connect, connect_in_memory};

use sqlx::SqlitePool;
use tempfile::TempDir;

/// In-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    connect_in_memory()
        .await
        .expect("Failed to create test pool")
}

/// File-backed WAL pool with several connections, for tests that race writers.
/// The returned TempDir must outlive the pool.
pub async fn create_shared_test_pool(max_connections: u32) -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = connect(&dir.path().join("identity.db"), max_connections)
        .await
        .expect("Failed to create shared test pool");
    (dir, pool)
}
