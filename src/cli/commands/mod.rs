pub mod config;
pub mod demo;

pub use config::{ConfigCommands, ConfigSubcommands};
pub use demo::DemoArgs;
