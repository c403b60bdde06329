//! Path matching for modns
//!
//! Maps a segment chain onto registry entries. Four shapes of file back the chain `a/b`:
//!
//! - `a/b.json` (exact)
//! - `.../a/b.json` (suffix)
//! - `a/b/index.json` (index)
//! - `.../a/b/index.json` (index suffix)
//!
//! Comparison is case-insensitive. More than one match is a collision and is always reported, never
//! settled by precedence.

use modns_core::conventions::LOGICAL_SEPARATOR;
use modns_core::paths::{Pattern, join_segments};

use crate::config::ResolverConfig;
use crate::errors::{ResolveError, ResolveResult};
use crate::registry::{Registry, RegistryEntry};

/// Matches segment chains against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    registry: &'a Registry,
    config: &'a ResolverConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(registry: &'a Registry, config: &'a ResolverConfig) -> Self {
        Self { registry, config }
    }

    /// Every entry matching `segments` under any of the four forms, in registry order.
    pub fn find<S: AsRef<str>>(&self, segments: &[S]) -> Vec<&'a RegistryEntry> {
        let request = join_segments(segments);
        let pattern = Pattern::new(&request, &self.config.extension, &self.config.index_stem);

        let mut matches: Vec<&RegistryEntry> = Vec::new();
        for entry in self.registry.entries() {
            if pattern.matches(&entry.key) && !matches.iter().any(|m| m.path == entry.path) {
                matches.push(entry);
            }
        }
        tracing::trace!(request = %request, count = matches.len(), "matched registry");
        matches
    }

    /// The unique entry for `segments`, `None` when nothing matches.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolveError::Collision`] when more than one entry matches.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> ResolveResult<Option<&'a RegistryEntry>> {
        let mut matches = self.find(segments);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(ResolveError::Collision {
                path: logical_path(segments),
                root: self.registry.root().map(|r| r.to_path_buf()),
                candidates: matches.into_iter().map(|m| m.path.clone()).collect(),
            }),
        }
    }
}

/// Dotted display form of a segment chain (`a.b.c`).
pub fn logical_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&LOGICAL_SEPARATOR.to_string())
}
