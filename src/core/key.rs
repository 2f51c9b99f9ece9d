use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::{OptionsError, OptionsResult};

/// Name of a single property slot in a value store.
///
/// Names are part of the wire contract with the rendering library and must
/// match its configuration schema exactly (`"backgroundColor"`, `"xMin"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    name: Cow<'static, str>,
}

/// Keys from the root of a tree down to a node.
pub type KeyPath = SmallVec<[Key; 4]>;

impl Key {
    /// Creates a key from a compile-time name.
    ///
    /// Panics on an empty name; in a `const` item that panic is a compile error.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        assert!(!name.is_empty(), "property key name must not be empty");
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Creates a key from a runtime name, such as a user-chosen annotation id.
    pub fn parse(name: impl Into<String>) -> OptionsResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OptionsError::InvalidKey { name });
        }
        Ok(Self {
            name: Cow::Owned(name),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(name).map_err(serde::de::Error::custom)
    }
}

/// Formats a key path as a dotted string for logs and diagnostics.
#[must_use]
pub fn display_path(path: &[Key]) -> String {
    if path.is_empty() {
        return "<root>".to_owned();
    }
    path.iter()
        .map(Key::name)
        .collect::<Vec<_>>()
        .join(".")
}

/// Enum whose values are stored as string tokens of the external schema.
pub trait TokenEnum: Copy + Sized + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Token written into the value store.
    fn token(self) -> &'static str;

    /// Reverse lookup of a stored token.
    #[must_use]
    fn from_token(token: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.token() == token)
    }
}
