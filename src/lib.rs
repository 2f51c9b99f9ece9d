//! chart-options-tree: typed, lazily attached wrappers over Chart.js-style
//! configuration objects.
//!
//! A [`Node`] wraps a dynamic key/value store that may not exist yet. Nested
//! wrappers splice their store into the parent on first write, so reading or
//! walking the tree never adds empty objects to the emitted configuration.
//! Missing values resolve through a [`DefaultChain`] that always ends at a
//! constant.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod telemetry;

pub use api::{ChartOptions, DefaultsSnapshot};
pub use crate::core::{
    DefaultChain, DefaultsProvider, Key, Node, ObjectRef, UnionValue, Value, ValueType,
};
pub use error::{OptionsError, OptionsResult};
