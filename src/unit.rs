//! Backing units and the loaders that produce them
//!
//! A backing unit is the object a resolved module file provides: a map of named members, three of
//! which may be export buckets (`operations`, `definitions`, `utilities`). The resolver only looks up
//! keys; how a unit is produced is up to the [`Loader`].
//!
//! The default loader reads JSON files. Loads are memoized per path by [`CachedLoader`], so repeated
//! resolution of the same file hands out the same unit.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use modns_core::naming::Bucket;
use serde_json::{Map, Value};

use crate::errors::LoadError;

/// An opaque loaded module.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    source: Option<PathBuf>,
    members: Map<String, Value>,
}

impl Unit {
    /// Wrap a member map that did not come from a file.
    pub fn new(members: Map<String, Value>) -> Self {
        Self { source: None, members }
    }

    /// Wrap a member map loaded from `source`.
    pub fn from_file(source: impl Into<PathBuf>, members: Map<String, Value>) -> Self {
        Self {
            source: Some(source.into()),
            members,
        }
    }

    /// File this unit was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Look up a member directly on the unit.
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// Return the bucket's members; `None` if the unit has no such bucket or it is not an object.
    pub fn bucket(&self, bucket: Bucket) -> Option<&Map<String, Value>> {
        self.members.get(bucket.key()).and_then(Value::as_object)
    }

    /// All members, including the buckets themselves.
    pub fn members(&self) -> &Map<String, Value> {
        &self.members
    }
}

/// Loads backing units by file path.
///
/// Implementations must be idempotent: loading the same path twice yields equivalent units. Errors
/// are handed to the caller unchanged by the resolver.
pub trait Loader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Arc<Unit>, LoadError>;
}

/// Reads module files as JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<Arc<Unit>, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(members) => Ok(Arc::new(Unit::from_file(path, members))),
            _ => Err(LoadError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Memoizes another loader by path.
///
/// Failed loads are not cached; the next access tries again through the wrapped loader.
#[derive(Debug, Default)]
pub struct CachedLoader<L> {
    inner: L,
    cache: Mutex<HashMap<PathBuf, Arc<Unit>>>,
}

impl<L: Loader> CachedLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of units currently cached.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Unit>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<L: Loader> Loader for CachedLoader<L> {
    fn load(&self, path: &Path) -> Result<Arc<Unit>, LoadError> {
        if let Some(unit) = self.lock().get(path) {
            return Ok(Arc::clone(unit));
        }
        let unit = self.inner.load(path)?;
        // Keep whichever unit landed first so every caller shares one instance.
        let unit = self.lock().entry(path.to_path_buf()).or_insert(unit).clone();
        Ok(unit)
    }
}

/// The process-wide JSON loader shared by every [`Resolver`](crate::Resolver) that does not supply
/// its own.
pub fn shared_loader() -> Arc<CachedLoader<JsonLoader>> {
    static SHARED: OnceLock<Arc<CachedLoader<JsonLoader>>> = OnceLock::new();
    Arc::clone(SHARED.get_or_init(|| Arc::new(CachedLoader::new(JsonLoader))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_json_loader_reads_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "m.json", r#"{"definitions": {"thing": 1}, "version": "2"}"#);
        let unit = JsonLoader.load(&path).unwrap();
        assert_eq!(unit.source(), Some(path.as_path()));
        assert_eq!(unit.member("version"), Some(&json!("2")));
        assert_eq!(unit.bucket(Bucket::Definitions).and_then(|b| b.get("thing")), Some(&json!(1)));
        assert!(unit.bucket(Bucket::Operations).is_none());
    }

    #[test]
    fn test_json_loader_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(JsonLoader.load(&missing), Err(LoadError::Io { .. })));

        let malformed = write(dir.path(), "bad.json", "{ not json");
        assert!(matches!(JsonLoader.load(&malformed), Err(LoadError::Parse { .. })));

        let array = write(dir.path(), "list.json", "[1, 2]");
        assert!(matches!(JsonLoader.load(&array), Err(LoadError::NotAnObject { .. })));
    }

    #[test]
    fn test_non_object_bucket_is_absent() {
        let unit = Unit::new(json!({"operations": [1, 2]}).as_object().unwrap().clone());
        assert!(unit.bucket(Bucket::Operations).is_none());
        assert!(unit.source().is_none());
    }

    struct CountingLoader(AtomicUsize);

    impl Loader for CountingLoader {
        fn load(&self, path: &Path) -> Result<Arc<Unit>, LoadError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Unit::from_file(path, Map::new())))
        }
    }

    #[test]
    fn test_cached_loader_loads_once() {
        let loader = CachedLoader::new(CountingLoader(AtomicUsize::new(0)));
        let a = loader.load(Path::new("/x/a.json")).unwrap();
        let again = loader.load(Path::new("/x/a.json")).unwrap();
        let b = loader.load(Path::new("/x/b.json")).unwrap();

        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(loader.inner.0.load(Ordering::SeqCst), 2);
        assert_eq!(loader.len(), 2);
    }

    #[test]
    fn test_cached_loader_does_not_cache_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.json");
        let loader = CachedLoader::new(JsonLoader);
        assert!(loader.load(&path).is_err());
        assert!(loader.is_empty());

        fs::write(&path, "{}").unwrap();
        assert!(loader.load(&path).is_ok());
        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn test_shared_loader_is_process_wide() {
        assert!(Arc::ptr_eq(&shared_loader(), &shared_loader()));
    }
}
