use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use modns_core::conventions::LOGICAL_SEPARATOR;

use super::{Resolved, Resolver, router};
use crate::errors::{ResolveError, ResolveResult};
use crate::matcher::{Matcher, logical_path};
use crate::registry::Registry;
use crate::unit::Unit;

#[derive(Clone)]
enum State {
    /// No module file matched the segments yet
    Unbound,
    /// Exactly one module file matched; reads go to the export router from now on
    Bound(Arc<Unit>),
}

/// A position in a namespace tree.
///
/// Identified by its root directory, its segment chain and, once bound, its module. Reading a name
/// never mutates the node: descending produces a new node. Mount overrides belong to the instance
/// they were assigned on and are not seen by nodes reached from it. A clone starts with a copy of
/// the mounts made so far; later mounts on either side stay separate.
#[derive(Clone)]
pub struct Node {
    resolver: Resolver,
    registry: Arc<Registry>,
    segments: Vec<String>,
    state: State,
    mounts: HashMap<String, Resolved>,
}

impl Node {
    pub(super) fn new_root(resolver: Resolver, registry: Registry) -> Self {
        Self {
            resolver,
            registry: Arc::new(registry),
            segments: Vec::new(),
            state: State::Unbound,
            mounts: HashMap::new(),
        }
    }

    /// Read `name` on this node.
    ///
    /// Mount overrides win over everything else. A bound node routes the read into its module's
    /// exports, yielding a value or [`Resolved::Absent`]. An unbound node extends its segment chain
    /// and looks for module files: none gives a deeper unbound node, one gives a node bound to the
    /// loaded module.
    ///
    /// ## Errors
    ///
    /// - [`ResolveError::Collision`] if the extended chain matches several files.
    /// - [`ResolveError::Load`] if the loader fails on the matched file.
    pub fn get(&self, name: &str) -> ResolveResult<Resolved> {
        if let Some(mounted) = self.mounts.get(name) {
            return Ok(mounted.clone());
        }
        match &self.state {
            State::Bound(unit) => Ok(router::route(unit, name)),
            State::Unbound => self.descend(name),
        }
    }

    fn descend(&self, name: &str) -> ResolveResult<Resolved> {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());

        let matcher = Matcher::new(&self.registry, self.resolver.config());
        let state = match matcher.resolve(&segments)? {
            None => State::Unbound,
            Some(entry) => {
                let unit = self.resolver.loader().load(&entry.path)?;
                tracing::debug!(
                    path = %logical_path(&segments),
                    file = %entry.path.display(),
                    "bound module"
                );
                State::Bound(unit)
            }
        };

        Ok(Resolved::Node(Node {
            resolver: self.resolver.clone(),
            registry: Arc::clone(&self.registry),
            segments,
            state,
            mounts: HashMap::new(),
        }))
    }

    /// Read a dotted path (`ui.widgets.Button`) one name at a time.
    ///
    /// ## Errors
    ///
    /// Everything [`Node::get`] returns, plus [`ResolveError::NotANamespace`] when the path continues
    /// past a member value or an absent member.
    pub fn lookup(&self, dotted: &str) -> ResolveResult<Resolved> {
        let mut current = Resolved::Node(self.clone());
        let mut walked: Vec<&str> = Vec::new();

        for name in dotted.split(LOGICAL_SEPARATOR).filter(|name| !name.is_empty()) {
            let node = match current {
                Resolved::Node(node) => node,
                Resolved::Value(_) | Resolved::Absent => {
                    return Err(ResolveError::NotANamespace {
                        path: logical_path(&walked),
                        name: name.to_string(),
                    });
                }
            };
            current = node.get(name)?;
            walked.push(name);
        }
        Ok(current)
    }

    /// Re-root: scan `root` and return a fresh root node.
    ///
    /// Nothing of this node carries over except the resolver's configuration and loader.
    pub fn reroot(&self, root: impl AsRef<Path>) -> Node {
        self.resolver.open(root)
    }

    /// Attach `value` under `name` on this node instance.
    ///
    /// Later reads of `name` on this instance return the value as-is, ahead of filesystem resolution
    /// and export routing. Mounting the same name again replaces the previous value.
    pub fn mount(&mut self, name: impl Into<String>, value: impl Into<Resolved>) {
        let name = name.into();
        tracing::debug!(path = %self.logical_path(), name = %name, "mounted override");
        self.mounts.insert(name, value.into());
    }

    /// Root directory of the tree this node belongs to.
    pub fn root(&self) -> Option<&Path> {
        self.registry.root()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dotted form of the segment chain; empty for a root node.
    pub fn logical_path(&self) -> String {
        logical_path(&self.segments)
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, State::Bound(_))
    }

    /// The module this node is bound to.
    pub fn unit(&self) -> Option<&Arc<Unit>> {
        match &self.state {
            State::Bound(unit) => Some(unit),
            State::Unbound => None,
        }
    }

    /// File backing the bound module, if it came from one.
    pub fn source(&self) -> Option<&Path> {
        self.unit().and_then(|unit| unit.source())
    }

    /// Registry of the tree this node belongs to.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mounts: Vec<&str> = self.mounts.keys().map(String::as_str).collect();
        mounts.sort_unstable();
        f.debug_struct("Node")
            .field("root", &self.root())
            .field("segments", &self.segments)
            .field("source", &self.source())
            .field("mounts", &mounts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{CachedLoader, JsonLoader};
    use serde_json::json;
    use std::fs;

    fn tree(files: &[(&str, &str)]) -> (tempfile::TempDir, Resolver) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, text) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        let resolver = Resolver::new().with_loader(Arc::new(CachedLoader::new(JsonLoader)));
        (dir, resolver)
    }

    fn node(resolved: Resolved) -> Node {
        resolved.into_node().expect("expected a node")
    }

    #[test]
    fn test_root_node_is_unbound_and_empty() {
        let (dir, resolver) = tree(&[]);
        let root = resolver.open(dir.path());
        assert!(!root.is_bound());
        assert!(root.segments().is_empty());
        assert_eq!(root.logical_path(), "");
        assert_eq!(root.root(), Some(dir.path()));
    }

    #[test]
    fn test_get_descends_then_binds() {
        let (dir, resolver) = tree(&[("a/b.json", r#"{"operations": {"go": 1}}"#)]);
        let root = resolver.open(dir.path());

        let a = node(root.get("a").unwrap());
        assert!(!a.is_bound());
        assert_eq!(a.segments(), ["a"]);

        let b = node(a.get("b").unwrap());
        assert!(b.is_bound());
        assert_eq!(b.logical_path(), "a.b");
        assert_eq!(b.source(), Some(dir.path().join("a/b.json").as_path()));
        assert_eq!(b.get("go").unwrap().as_value(), Some(&json!(1)));
    }

    #[test]
    fn test_bound_node_never_rematches_filesystem() {
        let (dir, resolver) = tree(&[("a.json", "{}"), ("a/b.json", "{}")]);
        let a = node(resolver.open(dir.path()).get("a").unwrap());
        assert!(a.is_bound());
        // `b` routes to the operations bucket of `a.json`, not to `a/b.json`.
        assert!(a.get("b").unwrap().is_absent());
    }

    #[test]
    fn test_loader_failure_propagates() {
        let (dir, resolver) = tree(&[("broken.json", "{ nope")]);
        let err = resolver.open(dir.path()).get("broken").unwrap_err();
        assert!(matches!(err, ResolveError::Load(crate::LoadError::Parse { .. })));
    }

    #[test]
    fn test_lookup_walks_dotted_path() {
        let (dir, resolver) = tree(&[("ui/widgets/button.json", r#"{"definitions": {"size": 3}}"#)]);
        let root = resolver.open(dir.path());
        assert_eq!(root.lookup("ui.widgets.button.Size").unwrap().as_value(), Some(&json!(3)));
        assert!(root.lookup("").unwrap().as_node().is_some());
    }

    #[test]
    fn test_lookup_past_terminal_is_error() {
        let (dir, resolver) = tree(&[("m.json", r#"{"definitions": {"size": 3}}"#)]);
        let err = resolver.open(dir.path()).lookup("m.Size.more").unwrap_err();
        match err {
            ResolveError::NotANamespace { path, name } => {
                assert_eq!(path, "m.Size");
                assert_eq!(name, "more");
            }
            other => panic!("expected NotANamespace, got {other:?}"),
        }
    }

    #[test]
    fn test_mount_applies_to_instance_only() {
        let (dir, resolver) = tree(&[]);
        let mut root = resolver.open(dir.path());
        root.mount("answer", json!(42));

        assert_eq!(root.get("answer").unwrap().as_value(), Some(&json!(42)));
        let fresh = resolver.open(dir.path());
        assert!(fresh.get("answer").unwrap().as_node().is_some());
    }

    #[test]
    fn test_clone_copies_mounts_then_diverges() {
        let (dir, resolver) = tree(&[]);
        let mut root = resolver.open(dir.path());
        root.mount("a", json!(1));

        let mut copy = root.clone();
        assert_eq!(copy.get("a").unwrap().as_value(), Some(&json!(1)));

        copy.mount("b", json!(2));
        root.mount("a", json!(3));
        assert_eq!(copy.get("a").unwrap().as_value(), Some(&json!(1)));
        assert!(root.get("b").unwrap().as_node().is_some());
    }

    #[test]
    fn test_mounts_do_not_reach_descendants() {
        let (dir, resolver) = tree(&[]);
        let mut root = resolver.open(dir.path());
        root.mount("x", json!(1));
        let child = node(root.get("child").unwrap());
        assert!(child.get("x").unwrap().as_node().is_some());
    }

    #[test]
    fn test_mount_on_bound_node_beats_router() {
        let (dir, resolver) = tree(&[("m.json", r#"{"operations": {"run": "disk"}}"#)]);
        let mut m = node(resolver.open(dir.path()).get("m").unwrap());
        m.mount("run", json!("mounted"));
        assert_eq!(m.get("run").unwrap().as_value(), Some(&json!("mounted")));
    }

    #[test]
    fn test_empty_name_binds_root_index() {
        let (dir, resolver) = tree(&[("index.json", r#"{"operations": {"main": true}}"#)]);
        let top = node(resolver.open(dir.path()).get("").unwrap());
        assert!(top.is_bound());
        assert_eq!(top.source(), Some(dir.path().join("index.json").as_path()));
        assert_eq!(top.get("main").unwrap().as_value(), Some(&json!(true)));
    }

    #[test]
    fn test_detached_resolves_nothing() {
        let resolver = Resolver::new();
        let detached = resolver.detached();
        assert!(detached.root().is_none());
        let deeper = node(detached.get("anything").unwrap());
        assert!(!deeper.is_bound());
    }

    #[test]
    fn test_debug_lists_mounts() {
        let mut root = Resolver::new().detached();
        root.mount("b", json!(1));
        root.mount("a", json!(2));
        let debug = format!("{root:?}");
        assert!(debug.contains(r#"mounts: ["a", "b"]"#));
    }
}
