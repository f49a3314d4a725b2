use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct DemoArgs {
    /// Number of crates stocked in the warehouse menu
    #[arg(short, long, default_value_t = 40)]
    pub stock: u32,

    /// Row limit of the warehouse menu, overriding the configuration
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Configuration file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
