//! Normalize logical paths and registry keys, and classify how a key matches a request.
//!
//! Matching is done on plain strings so it behaves the same on case-sensitive and case-insensitive
//! filesystems, and on every platform separator.
//!
//! ## Notes
//! - A normalized string is lowercased and uses `/` as its only separator.
//! - Suffix forms only match on a segment boundary: `baz` matches `foo/baz.json`, not `foobaz.json`.

use crate::conventions::KEY_SEPARATOR;

/// Normalize a path-like string for comparison.
///
/// ## Returns
/// - (`String`): the input lowercased, with every `\` turned into `/`.
pub fn normalize(path: &str) -> String {
    path.to_lowercase().replace('\\', "/")
}

/// Join navigation segments into a normalized request string.
///
/// ## Notes
/// - Empty segments are skipped, so `["a", "", "b"]` and `["a", "b"]` request the same path.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for segment in segments.iter().map(AsRef::as_ref).filter(|s| !s.is_empty()) {
        if !joined.is_empty() {
            joined.push(KEY_SEPARATOR);
        }
        joined.push_str(&normalize(segment));
    }
    joined
}

/// Which filesystem shape made a registry key match a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchForm {
    /// `a/b.ext` for request `a/b`.
    Exact,
    /// `x/a/b.ext` for request `a/b`.
    Suffix,
    /// `a/b/index.ext` for request `a/b`.
    Index,
    /// `x/a/b/index.ext` for request `a/b`.
    IndexSuffix,
}

/// The two file names a normalized request can be backed by.
///
/// An empty request names the directory itself, so only its index forms exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    file: Option<String>,
    index: String,
}

impl Pattern {
    /// Build the pattern for a request.
    ///
    /// ## Parameters
    /// - `request`: a request produced by [`join_segments`].
    /// - `extension`: the module extension without its dot.
    /// - `index_stem`: the stem of directory-style modules.
    ///
    /// ## Notes
    /// - An empty request matches `index.ext` and every `.../index.ext`, never a plain file.
    pub fn new(request: &str, extension: &str, index_stem: &str) -> Self {
        let extension = normalize(extension);
        let index_stem = normalize(index_stem);
        if request.is_empty() {
            return Self {
                file: None,
                index: format!("{index_stem}.{extension}"),
            };
        }
        Self {
            file: Some(format!("{request}.{extension}")),
            index: format!("{request}{KEY_SEPARATOR}{index_stem}.{extension}"),
        }
    }

    /// Classify a normalized registry key against this pattern.
    ///
    /// ## Returns
    /// - (`Option<MatchForm>`): the first form that holds, or `None` when the key does not match.
    pub fn classify(&self, key: &str) -> Option<MatchForm> {
        let file = self.file.as_deref();
        if file == Some(key) {
            Some(MatchForm::Exact)
        } else if key == self.index {
            Some(MatchForm::Index)
        } else if file.is_some_and(|file| ends_on_boundary(key, file)) {
            Some(MatchForm::Suffix)
        } else if ends_on_boundary(key, &self.index) {
            Some(MatchForm::IndexSuffix)
        } else {
            None
        }
    }

    /// Return `true` if the key matches under any form.
    pub fn matches(&self, key: &str) -> bool {
        self.classify(key).is_some()
    }
}

fn ends_on_boundary(key: &str, tail: &str) -> bool {
    key.len() > tail.len()
        && key.ends_with(tail)
        && key[..key.len() - tail.len()].ends_with(KEY_SEPARATOR)
}
