//! Define the naming convention that routes member access on a bound module.
//!
//! A loaded module exposes up to three export buckets. Which bucket a name addresses depends only on
//! how the name is spelled:
//!
//! | Spelling        | Bucket        | Key looked up                    |
//! |-----------------|---------------|----------------------------------|
//! | `Thing`         | `definitions` | `thing` (first char lowercased)  |
//! | `run`           | `operations`  | `run`                            |
//! | `_helper`       | `utilities`   | `helper` (prefix stripped)       |
//! | anything else   | none          | the name itself, on the module   |
//!
//! ## Notes
//! - Letter classes are ASCII. A name starting with a non-ASCII letter falls through to direct lookup.

use std::borrow::Cow;
use std::fmt;

use crate::conventions::{DEFINITIONS_KEY, OPERATIONS_KEY, UTILITIES_KEY, UTILITY_PREFIX};

/// One of the three export buckets of a backing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Operations,
    Definitions,
    Utilities,
}

impl Bucket {
    /// All buckets, in routing-table order.
    pub const ALL: [Bucket; 3] = [Bucket::Definitions, Bucket::Operations, Bucket::Utilities];

    /// Return the member name under which a backing unit stores this bucket.
    pub fn key(self) -> &'static str {
        match self {
            Bucket::Operations => OPERATIONS_KEY,
            Bucket::Definitions => DEFINITIONS_KEY,
            Bucket::Utilities => UTILITIES_KEY,
        }
    }

    /// Resolve a bucket from its member name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.key() == key)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where an accessed name should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// Look up `key` inside `bucket`.
    Bucket { bucket: Bucket, key: Cow<'a, str> },
    /// Look up the name directly on the backing unit.
    Direct(&'a str),
}

/// Classify an accessed name into its export route.
///
/// ## Parameters
/// - `name`: the name read on a bound namespace node.
///
/// ## Returns
/// - (`Route`): the bucket and transformed key, or a direct lookup for names outside the convention.
///
/// ## Notes
/// - Only definitions allocate: the first character is lowercased (`Thing` → `thing`).
pub fn route(name: &str) -> Route<'_> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest = chars.as_str();
            let mut key = String::with_capacity(name.len());
            key.push(first.to_ascii_lowercase());
            key.push_str(rest);
            Route::Bucket {
                bucket: Bucket::Definitions,
                key: Cow::Owned(key),
            }
        }
        Some(first) if first.is_ascii_lowercase() => Route::Bucket {
            bucket: Bucket::Operations,
            key: Cow::Borrowed(name),
        },
        Some(UTILITY_PREFIX) => Route::Bucket {
            bucket: Bucket::Utilities,
            key: Cow::Borrowed(chars.as_str()),
        },
        _ => Route::Direct(name),
    }
}

/// Return the spelling that addresses `key` inside `bucket`, the inverse of [`route`].
///
/// ## Returns
/// - (`Option<String>`): `None` when no spelling can reach the key (e.g. an operation named `Run`,
///   which would route to definitions).
pub fn export_name(bucket: Bucket, key: &str) -> Option<String> {
    match bucket {
        Bucket::Definitions => {
            let mut chars = key.chars();
            let first = chars.next().filter(char::is_ascii_lowercase)?;
            let mut name = String::with_capacity(key.len());
            name.push(first.to_ascii_uppercase());
            name.push_str(chars.as_str());
            Some(name)
        }
        Bucket::Operations => key
            .chars()
            .next()
            .filter(char::is_ascii_lowercase)
            .map(|_| key.to_string()),
        Bucket::Utilities => Some(format!("{UTILITY_PREFIX}{key}")),
    }
}
