//! Lazily resolved namespaces over a module directory
//!
//! A [`Resolver`] scans a root directory and hands out its root [`Node`]. Reading a name on a node
//! either descends one level (no file matched yet), binds a module (exactly one file matched), or
//! fails with a collision (several files matched). Reads on a bound node go through the export router.
//!
//! ```no_run
//! # fn main() -> Result<(), modns::ResolveError> {
//! let ns = modns::open("modules");
//! let button = ns.lookup("ui.widgets.Button")?;
//! # Ok(())
//! # }
//! ```

mod node;
pub mod router;

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ResolverConfig;
use crate::registry::Registry;
use crate::unit::{Loader, shared_loader};

pub use node::Node;

/// Outcome of reading a name on a [`Node`].
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A namespace node, unbound or bound to a module
    Node(Node),
    /// A member value exported by a bound module
    Value(Value),
    /// The member does not exist; not an error
    Absent,
}

impl Resolved {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Resolved::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Resolved::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Resolved::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }
}

impl From<Node> for Resolved {
    fn from(node: Node) -> Self {
        Resolved::Node(node)
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Resolved::Value(value)
    }
}

/// Creates namespace trees with a shared configuration and loader.
#[derive(Clone)]
pub struct Resolver {
    config: Arc<ResolverConfig>,
    loader: Arc<dyn Loader>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Resolver with the default configuration and the process-wide JSON loader.
    pub fn new() -> Self {
        Self {
            config: Arc::new(ResolverConfig::default()),
            loader: shared_loader(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Scan `root` and return its root node.
    ///
    /// A root that does not exist yields a tree with no modules; every read descends.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(&self, root: impl AsRef<Path>) -> Node {
        let registry = Registry::scan(Some(root.as_ref()), &self.config);
        Node::new_root(self.clone(), registry)
    }

    /// Root node without a root directory.
    ///
    /// Nothing resolves through it; it serves as a mount point or as the starting point for
    /// [`Node::reroot`].
    pub fn detached(&self) -> Node {
        Node::new_root(self.clone(), Registry::default())
    }

    pub(crate) fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }
}

/// Open `root` with the default resolver.
pub fn open(root: impl AsRef<Path>) -> Node {
    Resolver::new().open(root)
}
