//! Default resolution for properties missing from their store.
//!
//! Resolution walks an ordered list of [`DefaultSource`]s and ends at a
//! constant supplied by the caller, so it always terminates. Every source is a
//! pure read: consulting a default never materializes a store.

use std::fmt;
use std::rc::Rc;

use smallvec::{SmallVec, smallvec};

use crate::core::key::Key;
use crate::core::node::Node;
use crate::core::value::{FromValue, ObjectRef, Value};

/// Read-only registry of default values, addressed by the path of the node
/// being read and the property key.
///
/// Injected into root nodes and inherited by their children.
pub trait DefaultsProvider: fmt::Debug {
    fn lookup(&self, path: &[Key], key: &Key) -> Option<Value>;
}

/// Provider that never yields, leaving every property to its constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultsProvider for NoDefaults {
    fn lookup(&self, _path: &[Key], _key: &Key) -> Option<Value> {
        None
    }
}

/// Defaults held in a value tree shaped like the configuration it serves.
///
/// The tree is read through a [`Node`], so defaults edited through typed
/// wrappers after this provider was built are visible to later lookups.
#[derive(Debug, Clone)]
pub struct StoreDefaults {
    node: Node,
}

impl StoreDefaults {
    #[must_use]
    pub fn new(store: ObjectRef) -> Self {
        Self {
            node: Node::with_store(store, Rc::new(NoDefaults)),
        }
    }

    #[must_use]
    pub fn from_node(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl DefaultsProvider for StoreDefaults {
    fn lookup(&self, path: &[Key], key: &Key) -> Option<Value> {
        let mut current = self.node.store()?;
        for segment in path {
            let next = current.get(segment)?.as_object()?.clone();
            current = next;
        }
        current.get(key)
    }
}

/// Ordered providers; the first one that yields wins.
#[derive(Debug, Clone, Default)]
pub struct LayeredDefaults {
    layers: Vec<Rc<dyn DefaultsProvider>>,
}

impl LayeredDefaults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layer(mut self, layer: Rc<dyn DefaultsProvider>) -> Self {
        self.layers.push(layer);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl DefaultsProvider for LayeredDefaults {
    fn lookup(&self, path: &[Key], key: &Key) -> Option<Value> {
        self.layers
            .iter()
            .find_map(|layer| layer.lookup(path, key))
    }
}

/// One step of a default chain.
#[derive(Clone)]
pub enum DefaultSource {
    /// The node's own store.
    Instance,
    /// Another node read at the same key, such as chart-level options backing
    /// a dataset-level override.
    Inherited(Node),
    /// The provider injected into the node's root.
    NodeDefaults,
    /// An explicit provider queried with the node's path.
    Provider(Rc<dyn DefaultsProvider>),
}

impl DefaultSource {
    fn lookup(&self, node: &Node, key: &Key) -> Option<Value> {
        match self {
            Self::Instance => node.read(key),
            Self::Inherited(other) => other.read(key),
            Self::NodeDefaults => node.defaults().lookup(&node.path(), key),
            Self::Provider(provider) => provider.lookup(&node.path(), key),
        }
    }
}

impl fmt::Debug for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => f.write_str("Instance"),
            Self::Inherited(node) => f.debug_tuple("Inherited").field(node).finish(),
            Self::NodeDefaults => f.write_str("NodeDefaults"),
            Self::Provider(provider) => f.debug_tuple("Provider").field(provider).finish(),
        }
    }
}

/// Ordered fallback sources for a property.
///
/// A source yields when the key is present and its value decodes to the
/// requested type, or when the stored value is the `Null` sentinel. The
/// sentinel stops the walk and resolves to `None`. A present value of another
/// representation does not yield. When no source yields, the constant is
/// returned.
#[derive(Debug, Clone)]
pub struct DefaultChain {
    sources: SmallVec<[DefaultSource; 4]>,
}

impl Default for DefaultChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl DefaultChain {
    /// A chain with no sources: resolution returns the constant.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sources: SmallVec::new(),
        }
    }

    /// Instance value, then the node's injected defaults.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sources: smallvec![DefaultSource::Instance, DefaultSource::NodeDefaults],
        }
    }

    /// Instance value, then the inherited node, then the node's injected defaults.
    #[must_use]
    pub fn inheriting(from: Node) -> Self {
        Self {
            sources: smallvec![
                DefaultSource::Instance,
                DefaultSource::Inherited(from),
                DefaultSource::NodeDefaults,
            ],
        }
    }

    #[must_use]
    pub fn then(mut self, source: DefaultSource) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn sources(&self) -> &[DefaultSource] {
        &self.sources
    }

    /// Raw resolution: the first present value, sentinel included.
    #[must_use]
    pub fn resolve_value(&self, node: &Node, key: &Key, constant: Value) -> Value {
        self.sources
            .iter()
            .find_map(|source| source.lookup(node, key))
            .unwrap_or(constant)
    }

    #[must_use]
    pub fn resolve<T: FromValue>(&self, node: &Node, key: &Key, constant: T) -> Option<T> {
        self.resolve_by(node, key, T::from_value, constant)
    }

    /// Typed resolution with a custom decoder, used for enum tokens and unions.
    pub fn resolve_by<T, F>(&self, node: &Node, key: &Key, decode: F, constant: T) -> Option<T>
    where
        F: Fn(&Value) -> Option<T>,
    {
        for source in &self.sources {
            let Some(value) = source.lookup(node, key) else {
                continue;
            };
            if value.is_null() {
                return None;
            }
            if let Some(decoded) = decode(&value) {
                return Some(decoded);
            }
        }
        Some(constant)
    }
}
