pub mod commands;

use clap::{Parser, Subcommand};
use crate::error::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feed-loader")]
#[command(about = "Fetch an image feed and keep a local cache of it")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FEED_LOADER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Load the feed from the remote endpoint and cache it
    Fetch {
        /// Endpoint to load from instead of the configured one
        #[arg(long)]
        url: Option<String>,
    },

    /// Show the cached feed if it is still fresh
    Cached,

    /// Delete the cache if it is expired or unreadable
    Validate,

    /// Delete the cached feed
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // `init` must work even when the existing file does not parse.
        if let Commands::Init { force } = self.command {
            commands::init_logging(self.debug, self.verbose, "warn")?;
            return commands::init(self.config, force);
        }

        let config = commands::load_config(self.config.clone())?;

        commands::init_logging(self.debug, self.verbose, &config.logging.level)?;

        match self.command {
            Commands::Init { force } => {
                commands::init(self.config, force)
            }
            Commands::Fetch { url } => {
                commands::fetch(&config, url).await
            }
            Commands::Cached => {
                commands::cached(&config).await
            }
            Commands::Validate => {
                commands::validate(&config).await
            }
            Commands::Clear => {
                commands::clear(&config).await
            }
        }
    }
}
