//! The lazy-attaching property tree primitive.

pub mod defaults;
pub mod key;
pub mod node;
pub mod resolver;
pub mod value;

pub use defaults::{
    DefaultChain, DefaultSource, DefaultsProvider, LayeredDefaults, NoDefaults, StoreDefaults,
};
pub use key::{Key, KeyPath, TokenEnum, display_path};
pub use node::{Node, UpdateListener};
pub use resolver::{
    Content, Dimension, LineHeight, PercentageRange, PointStyle, PointStyleType, UnionValue,
    ValueType, decode_percentage, encode_percentage, positive_or_zero, resolve_type,
};
pub use value::{CanvasRef, FromValue, ImageRef, ObjectRef, Value};
