// ⚙️ Configuration - CLI flags with environment fallbacks
//
// SWIFT_DIRECTORY_DB    → SQLite file
// SWIFT_DIRECTORY_CSV   → SWIFT sheet used for import / bootstrap
// SWIFT_DIRECTORY_BIND  → server listen address
// RUST_LOG              → log filter

use clap::{Args, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "swift_directory=info,tower_http=info";

/// Where the directory lives and where it is bootstrapped from
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// SQLite database file (":memory:" for a throwaway directory)
    #[arg(long, env = "SWIFT_DIRECTORY_DB", default_value = "data/swift_codes.db")]
    pub database: PathBuf,

    /// SWIFT codes sheet exported as CSV
    #[arg(long, env = "SWIFT_DIRECTORY_CSV", default_value = "data/swift_codes.csv")]
    pub csv: PathBuf,
}

/// HTTP server settings
#[derive(Debug, Clone, Parser)]
#[command(name = "swift-server", version, about = "SWIFT code directory REST API")]
pub struct ServerConfig {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Address to listen on
    #[arg(long, env = "SWIFT_DIRECTORY_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Do not import the CSV on startup
    #[arg(long)]
    pub skip_bootstrap: bool,
}

/// Install the global tracing subscriber (RUST_LOG overrides the default)
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
