//! # CLI Module
//!
//! Command-line surface for the `postpack-gen` binary.
//!
//! ## Commands
//!
//! ### `export`
//!
//! Export a Postman collection from an OpenAPI specification:
//!
//! ```bash
//! postpack-gen export --spec openapi.yaml --output postman_collection.json
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Path to OpenAPI specification, YAML or JSON (required)
//! - `--output <FILE>` - Output file (default: postman_collection.json)
//! - `--name <NAME>` - Collection name (default: API Collection)
//! - `--host <URL>` - Host URL prepended to every request path (default: http://localhost)
//! - `--readme <FILE>` - Readme placed into the collection description (default: README.md)
//!
//! ### `inspect`
//!
//! Print the route table loaded from a specification:
//!
//! ```bash
//! postpack-gen inspect --spec openapi.yaml
//! ```
//!
//! ## Failure policy
//!
//! Exporting is best-effort: an unreadable readme degrades to an empty
//! description, a route that fails conversion is skipped with a warning, and
//! a failed output write is logged. Only a spec that cannot be loaded aborts
//! the run, and even then the failure is reported via the log rather than the
//! exit code.

mod commands;

pub use commands::{run_cli, Cli, Commands};
