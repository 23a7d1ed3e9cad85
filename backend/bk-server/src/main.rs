use bk_server::{AppState, build_router, ensure_admin, logger};

use bk_db::{IdentityStore, SqliteIdentityStore};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional (development)
    let _ = dotenvy::dotenv();

    let config = bk_config::Config::load()?;
    config.validate()?;

    let log_file_path: Option<PathBuf> = match config.logging.file {
        Some(ref filename) => {
            let path = bk_config::Config::config_dir()?.join(filename);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Some(path)
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting bk-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = bk_db::connect(&database_path, config.database.max_connections).await?;
    info!("Database ready");

    let store: Arc<dyn IdentityStore> = Arc::new(SqliteIdentityStore::new(pool));
    let app_state = AppState::from_config(store, &config)?;

    ensure_admin(&app_state, &config.bootstrap).await?;

    // Forget login limiter keys whose quota has fully replenished
    let limiter = app_state.login_limiter.clone();
    let sweep_every = Duration::from_secs(config.auth.login_window_secs.max(60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            limiter.retain_recent();
        }
    });

    let app = build_router(app_state, &config.server);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    // Port 0 is resolved by the OS
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
