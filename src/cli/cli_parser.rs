use crate::cli::{Commands, HELP_TEMPLATE};
use clap::Parser;
use kaban::utils::parse_buffer_size;

#[derive(Parser)]
#[command(
    // Obtain during build time, not runtime
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
#[command(
    after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", env!("CARGO_PKG_NAME"))
)]
pub struct Cli {
    /// Initial buffer capacity (e.g. 512, 64k, 1mb).
    #[arg(
        short = 'c',
        long = "capacity",
        value_name = "SIZE",
        default_value = "1mb",
        value_parser = parse_buffer_size
    )]
    pub capacity: usize,

    #[command(subcommand)]
    pub command: Commands,
}
