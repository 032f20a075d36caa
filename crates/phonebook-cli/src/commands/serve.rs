//! REST API server command

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use phonebook_core::{api, Config, PersonStore};

/// Run the REST API server until interrupted
pub async fn run(config: &Config) -> Result<()> {
    init_logging();

    let store = PersonStore::open(config).context("Failed to open person store")?;
    let app = api::router(store);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on port {}", config.port);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize stdout logging, honoring PHONEBOOK_LOG
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env("PHONEBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
