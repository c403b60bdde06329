#![forbid(unsafe_code)]
//! modns: lazily resolved, filesystem-backed module namespaces
//!
//! A namespace lets callers address modules under a directory by chained names (`ui.widgets.Button`)
//! without knowing whether each step is a directory, a file or a directory with an index file. Once a
//! name chain matches exactly one module file, the file is loaded and further names are routed into
//! its exports by spelling: `Button` reads a definition, `render` an operation, `_clamp` a utility.
//!
//! ## Error Policy
//!
//! - **Ambiguity is an error**: a chain matching several files fails with [`ResolveError::Collision`],
//!   listing every file. It is never settled by precedence.
//! - **Absence is not**: a missing export is [`Resolved::Absent`].
//! - **Loader failures** pass through unchanged as [`ResolveError::Load`].
//! - **Production code** uses `Result`/`Option` with `?`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`; `.unwrap()` is fine in tests.

pub mod cli;
pub mod config;
pub mod errors;
pub mod matcher;
pub mod namespace;
pub mod registry;
pub mod unit;

pub use config::ResolverConfig;
pub use errors::{LoadError, ResolveError, ResolveResult};
pub use matcher::Matcher;
pub use namespace::{Node, Resolved, Resolver, open};
pub use registry::{Registry, RegistryEntry};
pub use unit::{CachedLoader, JsonLoader, Loader, Unit, shared_loader};

pub use modns_core::naming::Bucket;
