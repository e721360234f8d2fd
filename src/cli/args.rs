//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// demandcast - retail demand-forecast review backend
#[derive(Parser, Debug)]
#[command(name = "demandcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable bearer-token authentication
        #[arg(long)]
        no_auth: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from(["demandcast", "serve", "--port", "9000", "--no-auth"])
            .unwrap();
        match cli.command {
            Command::Serve { port, no_auth, .. } => {
                assert_eq!(port, Some(9000));
                assert!(no_auth);
            }
        }
    }
}
