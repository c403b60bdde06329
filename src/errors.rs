//! Errors raised while resolving a namespace path
//!
//! Absence of a member is not an error: it is reported as [`Resolved::Absent`](crate::Resolved).
//! Only ambiguous addressing and loader failures reach the caller as errors.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use modns_core::errors::{COLLISION_HELP, NOT_A_NAMESPACE_HELP};
use thiserror::Error;

/// Errors raised by a backing-unit loader.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("cannot read module '{}': {source}", .path.display())]
    #[diagnostic(code(modns::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed module '{}': {source}", .path.display())]
    #[diagnostic(code(modns::load::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("module '{}' must contain a top-level object", .path.display())]
    #[diagnostic(code(modns::load::not_an_object), help("wrap the exports in a JSON object"))]
    NotAnObject { path: PathBuf },
}

/// Errors raised while resolving a name on a namespace node.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// The requested segment chain matched more than one module file.
    #[error("{}", render_collision(.path, .root, .candidates))]
    #[diagnostic(code(modns::collision), help("{}", COLLISION_HELP))]
    Collision {
        /// Dotted logical path that was requested
        path: String,
        /// Root directory of the namespace tree
        root: Option<PathBuf>,
        /// Every matching file, in registry order
        candidates: Vec<PathBuf>,
    },

    /// The loader failed; its error is passed through unchanged.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    /// Dotted lookup continued past a member value or an absent member.
    #[error("cannot resolve '{name}': '{path}' is not a namespace")]
    #[diagnostic(code(modns::not_a_namespace), help("{}", NOT_A_NAMESPACE_HELP))]
    NotANamespace { path: String, name: String },
}

/// Result type for namespace resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

fn render_collision(path: &str, root: &Option<PathBuf>, candidates: &[PathBuf]) -> String {
    let root = root.as_deref().unwrap_or(Path::new(""));
    let mut message = format!(
        "collision for \"{path}\" in {}: {} files match",
        root.display(),
        candidates.len()
    );
    for candidate in candidates {
        let _ = write!(message, "\n  {}", candidate.display());
    }
    message
}
