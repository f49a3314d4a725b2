use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;
mod commands;

use cli::Cli;
use cli::app::Commands;
use cli::commands::ConfigSubcommands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_stderr {
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Stderr)
            .init();
    } else {
        // Truncated on each run
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open("slot-menus.log")?;
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .init();
    }

    info!("Starting slot-menus");

    match cli.command {
        Commands::Demo(args) => commands::demo::demo_command(args).await,
        Commands::Config(config) => match config.command {
            ConfigSubcommands::Show { file } => commands::config::show_command(file),
            ConfigSubcommands::Path => commands::config::path_command(),
            ConfigSubcommands::Init { file, force } => commands::config::init_command(file, force),
        },
    }
}
