use crate::cli::{Cli, Commands};
use kaban::traits::{StoreReader, StoreWriter};
use kaban::utils::{compress_gzip, format_bytes};
use kaban::{Result, TypedStore};
use tracing::info;

/// Builds a store from the command's assignments and runs the command
/// against it.
///
/// Assignments are applied in order in one batch, so a repeated key leaves
/// a tombstone behind. Output goes to stdout; errors are returned to the
/// caller.
///
/// # References
/// - [`Commands`](crate::cli::Commands): Defines the available CLI commands.
/// - [`TypedStore`](kaban::TypedStore): The underlying store.
pub fn execute_command(cli: &Cli) -> Result<()> {
    let store = TypedStore::with_capacity(cli.capacity);

    let assignments = cli.command.assignments();
    let stored = store.store_all(
        assignments
            .iter()
            .map(|assignment| (assignment.key.as_str(), assignment.value.clone())),
    )?;
    info!(stored, capacity = cli.capacity, "Applied assignments.");

    match &cli.command {
        Commands::Json { gzip, .. } => {
            let json = store.to_json()?;

            match gzip {
                Some(path) => {
                    let compressed = compress_gzip(json.as_bytes())?;
                    std::fs::write(path, &compressed)?;
                    println!(
                        "Wrote {} ({} uncompressed) to {}",
                        format_bytes(compressed.len() as u64),
                        format_bytes(json.len() as u64),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }

        Commands::Get { key, .. } => {
            let value = store.load_value(key)?;
            println!("{}", serde_json::to_string(&value)?);
        }

        Commands::Dump { .. } => {
            print!("{}", store.hex_dump()?);
        }

        Commands::Info { .. } => {
            println!("{}", store.stats()?);
        }
    }

    Ok(())
}
