use crate::cli::{Assignment, parse_assignment};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the store as a JSON object
    Json {
        /// Write gzip-compressed JSON to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        gzip: Option<PathBuf>,

        /// Values to store, in order
        #[arg(value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },

    /// Print the value of one key as JSON
    Get {
        /// The key to read
        key: String,

        /// Values to store, in order
        #[arg(value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },

    /// Hex dump the record buffer
    Dump {
        /// Values to store, in order
        #[arg(value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },

    /// Show buffer statistics
    Info {
        /// Values to store, in order
        #[arg(value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },
}

impl Commands {
    pub fn assignments(&self) -> &[Assignment] {
        match self {
            Self::Json { assignments, .. }
            | Self::Get { assignments, .. }
            | Self::Dump { assignments }
            | Self::Info { assignments } => assignments,
        }
    }
}
