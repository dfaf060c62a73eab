use crate::collection::{write_collection, CollectionBuilder};
use crate::spec::load_spec;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line interface for postpack
#[derive(Parser)]
#[command(name = "postpack-gen")]
#[command(about = "Export a Postman collection from an OpenAPI route table", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Export a Postman collection from an OpenAPI spec
    Export {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file for the collection
        #[arg(short, long, default_value = "postman_collection.json")]
        output: PathBuf,

        /// Name of the collection
        #[arg(short, long, default_value = "API Collection")]
        name: String,

        /// Host URL prepended to every request path
        #[arg(long, default_value = "http://localhost")]
        host: String,

        /// Readme file placed into the collection description
        #[arg(long, default_value = "README.md")]
        readme: PathBuf,
    },
    /// Print the route table loaded from an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
}

/// Execute the CLI command provided by the user.
///
/// Failures follow the export's best-effort policy: they are logged, and the
/// process still finishes cleanly. A spec that cannot be loaded aborts the
/// run with no output file produced.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Export {
            spec,
            output,
            name,
            host,
            readme,
        } => {
            let spec_path = spec
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in spec path"))?;
            let table = match load_spec(spec_path) {
                Ok(table) => table,
                Err(err) => {
                    error!(spec = %spec.display(), %err, "failed to load spec, no collection produced");
                    return Ok(());
                }
            };

            let collection = CollectionBuilder::new(name.as_str(), host.as_str())
                .readme(readme)
                .build(&table);

            match write_collection(&collection, output) {
                Ok(()) => info!(output = %output.display(), "collection saved"),
                Err(err) => error!(output = %output.display(), %err, "failed to save collection"),
            }
            Ok(())
        }
        Commands::Inspect { spec } => {
            let spec_path = spec
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in spec path"))?;
            let table = match load_spec(spec_path) {
                Ok(table) => table,
                Err(err) => {
                    error!(spec = %spec.display(), %err, "failed to load spec");
                    return Ok(());
                }
            };
            println!("routes: {}", table.routes.len());
            for route in &table.routes {
                println!(
                    "{} {} -> {} [{}]",
                    route.method,
                    route.path_pattern,
                    route.handler_name,
                    route.tags.join(", ")
                );
            }
            Ok(())
        }
    }
}
