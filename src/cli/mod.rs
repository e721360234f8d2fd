//! CLI module for demandcast
//!
//! Parses arguments, initializes logging, and boots the server.

mod args;

pub use args::{Cli, Command};

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::http;
use crate::store::MemoryStore;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI-level errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            no_auth,
        } => {
            let mut app_config = match config {
                Some(path) => AppConfig::load(&path)?,
                None => AppConfig::from_env(),
            };
            if let Some(host) = host {
                app_config.host = host;
            }
            if let Some(port) = port {
                app_config.port = port;
            }
            if no_auth {
                app_config.authentication_enabled = false;
            }

            init_logging(cli.debug);
            serve(app_config)
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "demandcast={},tower_http={}",
            default_level, default_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn serve(config: AppConfig) -> CliResult<()> {
    let store = Arc::new(MemoryStore::new());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(http::serve(config, store))?;
    Ok(())
}
