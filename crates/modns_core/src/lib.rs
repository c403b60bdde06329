//! Provide the shared, pure vocabulary and helpers of the modns namespace resolver.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the resolver uses to decide which registry entries match a segment chain, and
//! - the export router uses to decide which bucket a name addresses.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no resolver-specific types.
//! - Current scope: naming conventions (bucket names, index stem, default extension), export routing,
//!   path normalization with the four match forms, and shared user-facing error messages.

pub mod conventions;
pub mod errors;
pub mod naming;
pub mod paths;

pub use naming::{Bucket, Route, export_name, route};
pub use paths::{MatchForm, Pattern, join_segments, normalize};
