//! # postpack
//!
//! **postpack** turns the OpenAPI 3.1 specification that drives a service into
//! a Postman collection (format v2.1.0) ready to import into an API client.
//!
//! ## Overview
//!
//! The whole tool is one conversion pass. The route table is loaded from the
//! OpenAPI document into typed metadata, each route is converted into a
//! request definition (URL, method, headers, parameters, body example,
//! documented responses), the definitions are grouped into folders by tag,
//! and the resulting document is written to disk as formatted JSON.
//!
//! ## Modules
//!
//! - **[`spec`]** - OpenAPI specification parsing and route-metadata extraction
//! - **[`collection`]** - collection document model, builder, and file output
//! - **[`cli`]** - the `postpack-gen` command surface
//!
//! ## Example
//!
//! ```rust,ignore
//! use postpack::collection::{write_collection, CollectionBuilder};
//! use postpack::spec::load_spec;
//!
//! let table = load_spec("openapi.yaml")?;
//! let collection = CollectionBuilder::new("Pet Store", "http://localhost")
//!     .readme("README.md")
//!     .build(&table);
//! write_collection(&collection, "postman_collection.json")?;
//! ```
//!
//! ## Failure policy
//!
//! The export is a dev-tool convenience, not a correctness-critical service:
//! a route that fails conversion is logged and skipped, an unreadable readme
//! degrades to an empty description, and a failed write is logged. Only a
//! spec that cannot be loaded aborts the run.

pub mod cli;
pub mod collection;
pub mod spec;

pub use collection::{write_collection, Collection, CollectionBuilder};
pub use spec::{load_spec, RouteMeta, RouteTable};
