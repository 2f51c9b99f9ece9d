use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::key::Key;
use crate::error::{OptionsError, OptionsResult};

/// Opaque handle to an image owned by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    #[must_use]
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }
}

/// Opaque handle to a canvas (drawing surface) owned by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasRef {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl CanvasRef {
    #[must_use]
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// A value held in a store slot.
///
/// `Null` is the explicit "unset" sentinel: the key is present but carries no
/// value, which stops default resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(ObjectRef),
    Image(ImageRef),
    Canvas(CanvasRef),
}

impl Value {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` when `target` is this value or is nested anywhere inside it.
    #[must_use]
    pub fn contains_store(&self, target: &ObjectRef) -> bool {
        match self {
            Self::Object(object) => object.contains_store(target),
            Self::Array(items) => items.iter().any(|item| item.contains_store(target)),
            _ => false,
        }
    }

    /// Converts to the JSON form consumed by the rendering library.
    ///
    /// Integral numbers are written as JSON integers and non-finite numbers as
    /// `null`. Image and canvas handles become descriptor objects since the
    /// live host elements cannot cross the JSON boundary.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Number(value) => number_to_json(*value),
            Self::String(value) => serde_json::Value::String(value.clone()),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Object(object) => object.to_json(),
            Self::Image(image) => serde_json::json!({
                "image": { "src": image.src, "width": image.width, "height": image.height }
            }),
            Self::Canvas(canvas) => serde_json::json!({
                "canvas": { "id": canvas.id, "width": canvas.width, "height": canvas.height }
            }),
        }
    }

    /// Builds a value tree from JSON. Objects become fresh shared stores.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(*value),
            serde_json::Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(value) => Self::String(value.clone()),
            serde_json::Value::Array(items) => {
                Self::Array(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Object(ObjectRef::from_json_map(map)),
        }
    }
}

fn number_to_json(value: f64) -> serde_json::Value {
    if !value.is_finite() {
        return serde_json::Value::Null;
    }
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return serde_json::Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Shared, mutable, insertion-ordered object: the value store.
///
/// Cloning the handle shares the same object, mirroring object references of
/// the consuming runtime. Equality is structural; use [`ObjectRef::ptr_eq`]
/// for identity.
#[derive(Clone, Default)]
pub struct ObjectRef {
    inner: Rc<RefCell<IndexMap<String, Value>>>,
}

impl ObjectRef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.inner.borrow().get(key.name()).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.inner.borrow().contains_key(key.name())
    }

    /// Inserts or replaces a slot. A replaced key keeps its original position.
    pub fn insert(&self, key: &Key, value: Value) -> Option<Value> {
        self.inner.borrow_mut().insert(key.name().to_owned(), value)
    }

    /// Removes a slot, preserving the order of the remaining keys.
    pub fn remove(&self, key: &Key) -> Option<Value> {
        self.inner.borrow_mut().shift_remove(key.name())
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    /// `true` when `target` is this object or is reachable through its values.
    #[must_use]
    pub fn contains_store(&self, target: &ObjectRef) -> bool {
        self.ptr_eq(target)
            || self
                .inner
                .borrow()
                .values()
                .any(|value| value.contains_store(target))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .inner
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    #[must_use]
    pub fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let entries = map
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_json(value)))
            .collect::<IndexMap<_, _>>();
        Self {
            inner: Rc::new(RefCell::new(entries)),
        }
    }

    pub fn from_json_str(input: &str) -> OptionsResult<Self> {
        let json: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| OptionsError::InvalidData(format!("failed to parse store json: {e}")))?;
        match json {
            serde_json::Value::Object(map) => Ok(Self::from_json_map(&map)),
            other => Err(OptionsError::InvalidData(format!(
                "store json root must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

pub(crate) fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.inner.borrow() == *other.inner.borrow()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.borrow().iter()).finish()
    }
}

/// Typed decoding of a stored value. Returns `None` on representation mismatch.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_f64()
            .filter(|number| number.is_finite())
            .map(|number| number.trunc() as i64)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

/// A single string reads as a one-element list.
impl FromValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(vec![text.clone()]),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect(),
            _ => None,
        }
    }
}

/// A single number reads as a one-element list.
impl FromValue for Vec<f64> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(vec![*number]),
            Value::Array(items) => items.iter().map(Value::as_f64).collect(),
            _ => None,
        }
    }
}

/// Dates are stored as epoch milliseconds.
impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        let millis = value.as_f64().filter(|number| number.is_finite())?;
        Utc.timestamp_millis_opt(millis as i64).single()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
