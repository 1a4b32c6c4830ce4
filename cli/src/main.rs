//! CertHub CLI server
//!
//! ```sh
//! # Default config (~/.config/certhub/config.toml)
//! certhub
//!
//! # Custom config, flat-file storage
//! certhub --config /etc/certhub/config.toml --backend json
//!
//! # Validate config without starting
//! certhub --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use certhub::config::{AppConfig, StorageBackend};
use certhub::server::{init_tracing, BoxError, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "certhub",
    version,
    about = "Student certificate registry and public verification service",
    long_about = "CertHub: REST API for managing students and their certificates, \
                  with a public certificate verification endpoint.\n\n\
                  Default config: ~/.config/certhub/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CERTHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the storage backend (database, json).
    #[arg(long)]
    backend: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default accounts.
    #[arg(long)]
    no_bootstrap: bool,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(certhub::default_config_path);
    let mut config = AppConfig::load(&config_path)?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(ref raw) = cli.backend {
        match StorageBackend::parse(raw) {
            Some(backend) => {
                info!("CLI override: backend = {}", backend.as_str());
                config.storage.backend = backend;
            }
            None => {
                error!("Unknown storage backend: {}", raw);
                return Err(format!("unknown storage backend: {raw}").into());
            }
        }
    }

    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Backend     : {}", config.storage.backend.as_str());
        match config.storage.backend {
            StorageBackend::Database => println!(
                "   Database    : {}",
                certhub::infrastructure::database::redact_url(&config.storage.database_url)
            ),
            StorageBackend::Json => {
                println!("   Data dir    : {}", config.storage.data_dir.display())
            }
        }
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        bootstrap_accounts: !cli.no_bootstrap,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
