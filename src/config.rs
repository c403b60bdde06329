//! Resolver configuration for modns
//!
//! Controls which files the registry scanner picks up and how directory-style modules are named.

use modns_core::conventions::{DEFAULT_EXTENSION, INDEX_STEM};

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Module file extension, without the leading dot
    pub extension: String,
    /// File stem that makes a directory addressable as a module
    pub index_stem: String,
    /// Whether the scanner descends into symlinked directories and keeps symlinked files
    pub follow_symlinks: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            index_stem: INDEX_STEM.to_string(),
            follow_symlinks: true,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the module file extension (a leading dot is ignored)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.strip_prefix('.').map(str::to_string).unwrap_or(extension);
        self
    }

    /// Set the index file stem
    pub fn with_index_stem(mut self, stem: impl Into<String>) -> Self {
        self.index_stem = stem.into();
        self
    }

    /// Set whether symlinks are followed while scanning
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Return `true` if a file name carries the configured extension (ASCII case-insensitive).
    pub fn is_module_file(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(&self.extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.extension, "json");
        assert_eq!(config.index_stem, "index");
        assert!(config.follow_symlinks);
    }

    #[test]
    fn test_builder_chain() {
        let config = ResolverConfig::new()
            .with_extension(".mod")
            .with_index_stem("main")
            .with_follow_symlinks(false);
        assert_eq!(config.extension, "mod");
        assert_eq!(config.index_stem, "main");
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_is_module_file() {
        let config = ResolverConfig::default();
        assert!(config.is_module_file("baz.json"));
        assert!(config.is_module_file("Baz.JSON"));
        assert!(!config.is_module_file("baz.json.bak"));
        assert!(!config.is_module_file("baz.txt"));
        assert!(!config.is_module_file("json"));
        assert!(!config.is_module_file(".json"));
    }
}
