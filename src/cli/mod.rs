pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigError};

#[derive(Parser)]
#[command(name = "headlines")]
#[command(about = "Top headlines from an RSS feed", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/headlines/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the first headlines matching a filter
    Top {
        /// Case-insensitive substring to look for in titles
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Maximum number of headlines (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Export headlines as JSON or CSV
    Export {
        /// Output format: json or csv
        #[arg(long, default_value = "json")]
        format: String,

        /// Case-insensitive substring to look for in titles
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Maximum number of headlines (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output file, "-" for stdout (default: suggested filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved configuration
    Config,
}
