//! Registry scanning for modns
//!
//! Walks a root directory once and records every module file under it. The resulting registry is a
//! point-in-time snapshot: it is never rescanned while nodes derived from it are alive.

use std::fs;
use std::path::{Component, Path, PathBuf};

use modns_core::conventions::KEY_SEPARATOR;
use modns_core::paths::normalize;

use crate::config::ResolverConfig;

/// A module file known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Path of the file as found on disk (root joined with the relative path)
    pub path: PathBuf,
    /// Normalized root-relative key, e.g. `foo/bar/baz.json`
    pub key: String,
}

/// Flat, order-stable collection of module files under one root.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    root: Option<PathBuf>,
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Scan `root` recursively for module files.
    ///
    /// A missing root, a root that does not exist, or one that is not a directory yields an empty
    /// registry. Unreadable entries below the root are skipped; the walk continues with their siblings.
    #[tracing::instrument(skip_all, fields(root = ?root))]
    pub fn scan(root: Option<&Path>, config: &ResolverConfig) -> Self {
        let Some(root) = root.filter(|r| !r.as_os_str().is_empty()) else {
            return Self::default();
        };

        let mut entries = Vec::new();
        if root.is_dir() {
            walk(root, root, config, &mut entries);
        } else {
            tracing::debug!("root {} is not a directory; registry is empty", root.display());
        }

        tracing::debug!(count = entries.len(), "registry scanned");
        Self {
            root: Some(root.to_path_buf()),
            entries,
        }
    }

    /// Root directory this registry was scanned from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// All entries, in scan order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn walk(root: &Path, dir: &Path, config: &ResolverConfig, entries: &mut Vec<RegistryEntry>) {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            tracing::warn!("skipping unreadable directory {}: {}", dir.display(), e);
            return;
        }
    };

    let mut children: Vec<_> = read
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect();
    children.sort_by_key(|entry| entry.file_name());

    for child in children {
        let path = child.path();
        let file_type = match child.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let (is_dir, is_file) = if file_type.is_symlink() {
            if !config.follow_symlinks {
                continue;
            }
            // Follow the link; a dangling or looping link is skipped.
            match fs::metadata(&path) {
                Ok(meta) => (meta.is_dir(), meta.is_file()),
                Err(e) => {
                    tracing::warn!("skipping symlink {}: {}", path.display(), e);
                    continue;
                }
            }
        } else {
            (file_type.is_dir(), file_type.is_file())
        };

        if is_dir {
            walk(root, &path, config, entries);
        } else if is_file && config.is_module_file(&child.file_name().to_string_lossy()) {
            if let Some(key) = relative_key(root, &path) {
                entries.push(RegistryEntry { path, key });
            }
        }
    }
}

/// Normalized `/`-separated key of `path` relative to `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(normalize(&parts.join(&KEY_SEPARATOR.to_string())))
}
