use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::defaults::{DefaultChain, DefaultsProvider, NoDefaults};
use crate::core::key::{Key, KeyPath, TokenEnum, display_path};
use crate::core::resolver::{
    PercentageRange, UnionValue, ValueType, decode_percentage, encode_percentage,
    positive_or_zero, resolve_type,
};
use crate::core::value::{FromValue, ObjectRef, Value};
use crate::error::{OptionsError, OptionsResult};

/// Callback invoked after every write through a node, and when a write
/// through a descendant attaches this node's store.
pub type UpdateListener = Rc<dyn Fn(&Node)>;

/// Typed wrapper around a possibly absent value store.
///
/// A node with a parent is addressed by the key it would occupy in the
/// parent's store. Its store is created and spliced into the parent only when
/// something is written through it; building a node or reading from it never
/// changes the shape of the tree.
///
/// The handle is cheap to clone and clones share identity. Wrappers built for
/// the same logical child resolve their store through the parent on every
/// access, so they always observe the same object.
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeInner>,
}

struct NodeInner {
    store: RefCell<Option<ObjectRef>>,
    parent: Option<Node>,
    attach_key: Option<Key>,
    defaults: Rc<dyn DefaultsProvider>,
    listener: RefCell<Option<UpdateListener>>,
}

impl Node {
    /// Creates a root node with no store; the store appears on first write.
    #[must_use]
    pub fn root(defaults: Rc<dyn DefaultsProvider>) -> Self {
        Self::build(None, None, None, defaults)
    }

    /// Creates a root node with no defaults provider.
    #[must_use]
    pub fn detached() -> Self {
        Self::root(Rc::new(NoDefaults))
    }

    /// Wraps an existing store as a root.
    #[must_use]
    pub fn with_store(store: ObjectRef, defaults: Rc<dyn DefaultsProvider>) -> Self {
        Self::build(Some(store), None, None, defaults)
    }

    /// Parses a JSON object into a fresh store and wraps it as a root.
    pub fn from_json_str(input: &str, defaults: Rc<dyn DefaultsProvider>) -> OptionsResult<Self> {
        let store = ObjectRef::from_json_str(input)?;
        Ok(Self::with_store(store, defaults))
    }

    fn build(
        store: Option<ObjectRef>,
        parent: Option<Node>,
        attach_key: Option<Key>,
        defaults: Rc<dyn DefaultsProvider>,
    ) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                store: RefCell::new(store),
                parent,
                attach_key,
                defaults,
                listener: RefCell::new(None),
            }),
        }
    }

    /// Wraps the child stored (or to be stored) under `key`.
    ///
    /// Pure construction: nothing is allocated in the store tree.
    #[must_use]
    pub fn child(&self, key: Key) -> Node {
        Self::build(
            None,
            Some(self.clone()),
            Some(key),
            Rc::clone(&self.inner.defaults),
        )
    }

    /// Same as [`Node::child`] for a runtime key name.
    pub fn child_named(&self, name: impl Into<String>) -> OptionsResult<Node> {
        Ok(self.child(Key::parse(name)?))
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Node> {
        self.inner.parent.as_ref()
    }

    #[must_use]
    pub fn attach_key(&self) -> Option<&Key> {
        self.inner.attach_key.as_ref()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    #[must_use]
    pub fn root_node(&self) -> Node {
        let mut current = self.clone();
        while let Some(parent) = current.parent().cloned() {
            current = parent;
        }
        current
    }

    /// Keys from the root down to this node.
    #[must_use]
    pub fn path(&self) -> KeyPath {
        let mut path = KeyPath::new();
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(key) = node.attach_key() {
                path.push(key.clone());
            }
            current = node.parent();
        }
        path.reverse();
        path
    }

    #[must_use]
    pub fn defaults(&self) -> &Rc<dyn DefaultsProvider> {
        &self.inner.defaults
    }

    /// `true` when both handles are the same wrapper.
    #[must_use]
    pub fn same_node(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The current store, without materializing anything.
    ///
    /// For a child this is whatever object the parent holds under the attach
    /// key right now; a non-object value there counts as absent.
    #[must_use]
    pub fn store(&self) -> Option<ObjectRef> {
        let (Some(parent), Some(key)) = (self.parent(), self.attach_key()) else {
            return self.inner.store.borrow().clone();
        };
        let resolved = parent
            .store()
            .and_then(|parent_store| parent_store.get(key))
            .and_then(|value| match value {
                Value::Object(object) => Some(object),
                _ => None,
            });
        self.inner.store.replace(resolved.clone());
        resolved
    }

    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.store().is_some()
    }

    /// Returns the store, creating it and attaching it to every ancestor that
    /// lacks one, root first.
    fn materialize(&self) -> ObjectRef {
        if let Some(store) = self.store() {
            return store;
        }
        let store = ObjectRef::new();
        match (self.parent(), self.attach_key()) {
            (Some(parent), Some(key)) => {
                let parent_store = parent.materialize_as_ancestor();
                if let Some(previous) = parent_store.insert(key, Value::Object(store.clone())) {
                    debug!(
                        path = %display_path(&self.path()),
                        replaced = ?resolve_type(Some(&previous)),
                        "attached store over a non-object value"
                    );
                }
                trace!(path = %display_path(&self.path()), "attached store to parent");
            }
            _ => trace!("created root store"),
        }
        self.inner.store.replace(Some(store.clone()));
        store
    }

    fn materialize_as_ancestor(&self) -> ObjectRef {
        if let Some(store) = self.store() {
            return store;
        }
        let store = self.materialize();
        self.notify();
        store
    }

    // ------------------------------------------
    // raw protocol
    // ------------------------------------------

    /// Reads a slot; absent store or key yields `None` with no side effects.
    #[must_use]
    pub fn read(&self, key: &Key) -> Option<Value> {
        self.store()?.get(key)
    }

    /// Writes a slot, materializing the store chain first if needed.
    ///
    /// # Panics
    ///
    /// Panics when `value` contains the store of this node or of one of its
    /// ancestors, since the tree would then contain itself.
    pub fn write(&self, key: &Key, value: Value) {
        self.assert_acyclic(key, &value);
        let store = self.materialize();
        store.insert(key, value);
        self.notify();
    }

    fn assert_acyclic(&self, key: &Key, value: &Value) {
        if !matches!(value, Value::Object(_) | Value::Array(_)) {
            return;
        }
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(store) = node.store() {
                assert!(
                    !value.contains_store(&store),
                    "cannot write `{key}` at {}: the value contains the store of {}",
                    display_path(&self.path()),
                    display_path(&node.path()),
                );
            }
            current = node.parent();
        }
    }

    /// Removes a slot. Never detaches this node from its parent, even when the
    /// store becomes empty.
    pub fn remove(&self, key: &Key) -> Option<Value> {
        self.store()?.remove(key)
    }

    /// Removes several slots.
    pub fn remove_all(&self, keys: &[Key]) {
        if let Some(store) = self.store() {
            for key in keys {
                store.remove(key);
            }
        }
    }

    /// Detaches this node's store from its parent (or drops a root's store).
    /// A non-object value under the attach key is not this node's store and
    /// is left in place.
    ///
    /// The wrapper stays usable; the next write materializes a fresh store.
    /// Returns `true` when something was detached.
    pub fn remove_self(&self) -> bool {
        let detached = match (self.parent(), self.attach_key()) {
            (Some(parent), Some(key)) => match parent.store() {
                Some(parent_store) if matches!(parent_store.get(key), Some(Value::Object(_))) => {
                    parent_store.remove(key).is_some()
                }
                _ => false,
            },
            _ => self.inner.store.borrow().is_some(),
        };
        self.inner.store.replace(None);
        detached
    }

    #[must_use]
    pub fn has(&self, key: &Key) -> bool {
        self.store().is_some_and(|store| store.contains(key))
    }

    /// `true` only when every key is present.
    #[must_use]
    pub fn has_all(&self, keys: &[Key]) -> bool {
        !keys.is_empty() && keys.iter().all(|key| self.has(key))
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.store().map(|store| store.keys()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store().is_none_or(|store| store.is_empty())
    }

    #[must_use]
    pub fn value_type(&self, key: &Key) -> ValueType {
        resolve_type(self.read(key).as_ref())
    }

    #[must_use]
    pub fn is_type(&self, key: &Key, types: &[ValueType]) -> bool {
        let actual = self.value_type(key);
        types.contains(&actual)
    }

    // ------------------------------------------
    // listener
    // ------------------------------------------

    pub fn set_update_listener(&self, listener: impl Fn(&Node) + 'static) {
        self.inner.listener.replace(Some(Rc::new(listener)));
    }

    pub fn clear_update_listener(&self) {
        self.inner.listener.replace(None);
    }

    fn notify(&self) {
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(self);
        }
    }

    // ------------------------------------------
    // typed setters
    // ------------------------------------------

    pub fn set_value(&self, key: &Key, value: impl Into<Value>) {
        self.write(key, value.into());
    }

    pub fn set_number(&self, key: &Key, value: f64) {
        self.write(key, Value::Number(value));
    }

    pub fn set_integer(&self, key: &Key, value: i64) {
        self.write(key, Value::from(value));
    }

    /// Negative and NaN sizes are stored as `0`.
    pub fn set_pixels(&self, key: &Key, value: f64) {
        self.write(key, Value::Number(positive_or_zero(value)));
    }

    pub fn set_bool(&self, key: &Key, value: bool) {
        self.write(key, Value::Bool(value));
    }

    pub fn set_string(&self, key: &Key, value: impl Into<String>) {
        self.write(key, Value::String(value.into()));
    }

    /// `None` removes the slot.
    pub fn set_optional_string<S: Into<String>>(&self, key: &Key, value: Option<S>) {
        match value {
            Some(value) => self.set_string(key, value),
            None => {
                self.remove(key);
            }
        }
    }

    pub fn set_token<E: TokenEnum>(&self, key: &Key, value: E) {
        self.write(key, Value::String(value.token().to_owned()));
    }

    /// One value is stored as a scalar, any other count as an array.
    pub fn set_strings<S: AsRef<str>>(&self, key: &Key, values: &[S]) {
        let value = match values {
            [single] => Value::String(single.as_ref().to_owned()),
            _ => Value::Array(
                values
                    .iter()
                    .map(|value| Value::String(value.as_ref().to_owned()))
                    .collect(),
            ),
        };
        self.write(key, value);
    }

    /// One value is stored as a scalar, any other count as an array.
    pub fn set_numbers(&self, key: &Key, values: &[f64]) {
        let value = match values {
            [single] => Value::Number(*single),
            _ => Value::Array(values.iter().copied().map(Value::Number).collect()),
        };
        self.write(key, value);
    }

    /// Stored as epoch milliseconds.
    pub fn set_date(&self, key: &Key, value: DateTime<Utc>) {
        self.set_integer(key, value.timestamp_millis());
    }

    pub fn set_union<U: UnionValue>(&self, key: &Key, value: U) {
        self.write(key, value.encode());
    }

    /// Stores a fraction as a percentage string; out-of-range input is
    /// replaced by `default`.
    pub fn set_percentage(&self, key: &Key, fraction: f64, range: PercentageRange, default: f64) {
        self.write(key, Value::String(encode_percentage(fraction, range, default)));
    }

    /// Stores another node's store under `key`, materializing it if needed.
    /// Both nodes then observe the same object.
    ///
    /// Panics when `value` is this node or one of its ancestors.
    pub fn set_node(&self, key: &Key, value: &Node) {
        let store = value.materialize();
        self.write(key, Value::Object(store));
    }

    /// Stores a list of child objects, in order. Each node is materialized and
    /// keeps sharing its store with the list. One node is stored as a plain
    /// object, any other count as an array.
    pub fn set_nodes(&self, key: &Key, values: &[Node]) {
        let value = match values {
            [single] => Value::Object(single.materialize()),
            _ => Value::Array(
                values
                    .iter()
                    .map(|node| Value::Object(node.materialize()))
                    .collect(),
            ),
        };
        self.write(key, value);
    }

    /// Stores the explicit "unset" sentinel, which stops default resolution.
    pub fn set_unset(&self, key: &Key) {
        self.write(key, Value::Null);
    }

    // ------------------------------------------
    // typed getters
    // ------------------------------------------

    /// The stored value decoded as `T`; `None` when absent or stored with
    /// another representation.
    #[must_use]
    pub fn get<T: FromValue>(&self, key: &Key) -> Option<T> {
        self.read(key).and_then(|value| T::from_value(&value))
    }

    /// Resolves through the standard chain: instance, injected defaults, then
    /// `constant`. `None` only when the `Null` sentinel is hit.
    #[must_use]
    pub fn get_or<T: FromValue>(&self, key: &Key, constant: T) -> Option<T> {
        DefaultChain::standard().resolve(self, key, constant)
    }

    /// Resolves an enum token through the standard chain. Unrecognized tokens
    /// fall through to the next source.
    #[must_use]
    pub fn get_token_or<E: TokenEnum>(&self, key: &Key, default: E) -> Option<E> {
        DefaultChain::standard().resolve_by(
            self,
            key,
            |value| value.as_str().and_then(E::from_token),
            default,
        )
    }

    /// Resolves a union through the standard chain.
    #[must_use]
    pub fn get_union_or<U: UnionValue>(&self, key: &Key, constant: U) -> Option<U> {
        DefaultChain::standard().resolve_by(self, key, U::decode, constant)
    }

    /// Raw resolution through an explicit chain ending in `constant`.
    #[must_use]
    pub fn get_with_default(&self, key: &Key, chain: &DefaultChain, constant: Value) -> Value {
        chain.resolve_value(self, key, constant)
    }

    #[must_use]
    pub fn get_union<U: UnionValue>(&self, key: &Key) -> Option<U> {
        self.read(key).and_then(|value| U::decode(&value))
    }

    /// One root wrapper per stored object, in order, sharing this node's
    /// defaults provider. A single object reads as a one-element list; `None`
    /// when absent or when any element is not an object.
    #[must_use]
    pub fn get_nodes(&self, key: &Key) -> Option<Vec<Node>> {
        let stores = match self.read(key)? {
            Value::Object(object) => vec![object],
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(object) => Some(object),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?,
            _ => return None,
        };
        Some(
            stores
                .into_iter()
                .map(|store| Self::with_store(store, Rc::clone(self.defaults())))
                .collect(),
        )
    }

    /// The stored percentage as a fraction; `None` for numbers or strings of
    /// any other shape.
    #[must_use]
    pub fn get_percentage(&self, key: &Key) -> Option<f64> {
        self.read(key)
            .and_then(|value| value.as_str().and_then(decode_percentage))
    }

    // ------------------------------------------
    // wire format
    // ------------------------------------------

    /// JSON snapshot of this node's store; `{}` while unmaterialized.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.store()
            .map(|store| store.to_json())
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
    }

    pub fn to_json_pretty(&self) -> OptionsResult<String> {
        serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| OptionsError::InvalidData(format!("failed to serialize store: {e}")))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &display_path(&self.path()))
            .field("store", &self.store())
            .finish()
    }
}
