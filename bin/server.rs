// SWIFT Code Directory - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use clap::Parser;
use swift_directory::api::{router, AppState};
use swift_directory::config::{init_tracing, ServerConfig};
use swift_directory::{bootstrap, DirectoryService, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = ServerConfig::parse();

    // Open database
    let store = SqliteStore::open(&config.storage.database)?;
    tracing::info!(path = %config.storage.database.display(), "database opened");

    let service = DirectoryService::new(store);

    if !config.skip_bootstrap {
        if let Some(summary) = bootstrap(&service, &config.storage.csv)? {
            tracing::info!(
                banks = summary.banks_created,
                skipped = summary.skipped,
                "directory bootstrapped"
            );
        }
    }

    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!("server running on http://{}", config.bind);

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}
