use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective configuration as TOML
    Show {
        /// Read this file instead of the default location
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the default config file location
    Path,
    /// Write the default configuration to disk
    Init {
        /// Write here instead of the default location
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
