//! Tool adapters
//!
//! Concrete implementations behind the application ports:
//!
//! - `executor`: [`ProcessExecutor`] spawns the built command line
//! - `dry_run`: [`DryRunExecutor`] reports it instead
//! - `schema`: [`JsonSchemaToolConverter`] exports the catalog as JSON Schema
//! - `discovery`: which of the configured binaries are on `PATH`

pub mod discovery;

mod dry_run;
mod executor;
mod schema;

pub use discovery::{DetectedBinary, DiscoveryResult, discover_binaries};
pub use dry_run::DryRunExecutor;
pub use executor::ProcessExecutor;
pub use schema::JsonSchemaToolConverter;
