use super::commands::{ConfigCommands, DemoArgs};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slot-menus")]
#[command(about = "Drive and configure slot-based menus from the command line")]
pub struct Cli {
    /// Log to stderr instead of slot-menus.log
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted multi-user session against an in-memory host
    Demo(DemoArgs),
    /// Menu appearance configuration
    Config(ConfigCommands),
}
