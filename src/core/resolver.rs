//! Runtime type resolution for properties with more than one legal stored
//! shape, and the tagged unions those properties decode into.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::key::TokenEnum;
use crate::core::value::{CanvasRef, ImageRef, Value};

/// Category of the value currently stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Array,
    Object,
    Image,
    Canvas,
    Undefined,
}

/// Resolves the category of a stored value.
///
/// Host handles are matched before the generic object category; a missing
/// slot and the explicit `Null` sentinel both resolve to `Undefined`.
#[must_use]
pub fn resolve_type(value: Option<&Value>) -> ValueType {
    let Some(value) = value else {
        return ValueType::Undefined;
    };
    match value {
        Value::Image(_) => ValueType::Image,
        Value::Canvas(_) => ValueType::Canvas,
        Value::Object(_) => ValueType::Object,
        Value::Array(_) => ValueType::Array,
        Value::Number(_) => ValueType::Number,
        Value::String(_) => ValueType::String,
        Value::Bool(_) => ValueType::Boolean,
        Value::Null => ValueType::Undefined,
    }
}

static PERCENTAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?%$").unwrap_or_else(|e| panic!("invalid percentage pattern: {e}"))
});

/// Accepted domain for a percentage property, expressed as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageRange {
    pub min: f64,
    pub max: f64,
}

impl PercentageRange {
    /// `0%` to `100%`.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };
    /// `-1000%` to `1000%`, used by curve control points.
    pub const CONTROL_POINT: Self = Self {
        min: -10.0,
        max: 10.0,
    };

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Encodes a fraction as a `"<value*100>%"` string.
///
/// Out-of-range or non-finite inputs are replaced by `default`, itself clamped
/// into the range.
#[must_use]
pub fn encode_percentage(value: f64, range: PercentageRange, default: f64) -> String {
    let accepted = if range.contains(value) {
        value
    } else {
        let substitute = range.clamp(default);
        debug!(
            value,
            substitute, "percentage outside accepted range, using default"
        );
        substitute
    };
    format!("{}%", accepted * 100.0)
}

/// Decodes a `"<number>%"` string back to a fraction.
#[must_use]
pub fn decode_percentage(text: &str) -> Option<f64> {
    if !PERCENTAGE_PATTERN.is_match(text) {
        return None;
    }
    text[..text.len() - 1]
        .parse::<f64>()
        .ok()
        .map(|percent| percent / 100.0)
}

/// Pixel sizes cannot be negative.
#[must_use]
pub fn positive_or_zero(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if value < 0.0 {
        debug!(value, "negative pixel size, using 0");
        return 0.0;
    }
    value
}

/// A property whose stored representation varies at runtime.
///
/// Decoding happens once per read; `None` means the stored value matches no
/// variant.
pub trait UnionValue: Sized {
    fn decode(value: &Value) -> Option<Self>;
    fn encode(self) -> Value;
}

/// Label content: one line, several lines, or a host drawable.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Lines(Vec<String>),
    Image(ImageRef),
    Canvas(CanvasRef),
}

impl Content {
    /// Text lines, if the content is textual. A single string is one line.
    #[must_use]
    pub fn lines(&self) -> Option<Vec<String>> {
        match self {
            Self::Text(text) => Some(vec![text.clone()]),
            Self::Lines(lines) => Some(lines.clone()),
            Self::Image(_) | Self::Canvas(_) => None,
        }
    }
}

impl UnionValue for Content {
    fn decode(value: &Value) -> Option<Self> {
        match value {
            Value::Image(image) => Some(Self::Image(image.clone())),
            Value::Canvas(canvas) => Some(Self::Canvas(canvas.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self::Lines),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }

    fn encode(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            // one line is stored as a plain string
            Self::Lines(mut lines) if lines.len() == 1 => Value::String(lines.remove(0)),
            Self::Lines(lines) => Value::Array(lines.into_iter().map(Value::String).collect()),
            Self::Image(image) => Value::Image(image),
            Self::Canvas(canvas) => Value::Canvas(canvas),
        }
    }
}

/// A size given in pixels or as a fraction of a reference dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Pixels(f64),
    Percentage(f64),
}

impl UnionValue for Dimension {
    fn decode(value: &Value) -> Option<Self> {
        match value {
            Value::Number(pixels) => Some(Self::Pixels(*pixels)),
            Value::String(text) => decode_percentage(text).map(Self::Percentage),
            _ => None,
        }
    }

    fn encode(self) -> Value {
        match self {
            Self::Pixels(pixels) => Value::Number(positive_or_zero(pixels)),
            Self::Percentage(fraction) => {
                Value::String(encode_percentage(fraction, PercentageRange::UNIT, 1.0))
            }
        }
    }
}

/// Built-in point shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointStyleType {
    Circle,
    Cross,
    CrossRot,
    Dash,
    Line,
    Rect,
    RectRounded,
    RectRot,
    Star,
    Triangle,
}

impl TokenEnum for PointStyleType {
    const VARIANTS: &'static [Self] = &[
        Self::Circle,
        Self::Cross,
        Self::CrossRot,
        Self::Dash,
        Self::Line,
        Self::Rect,
        Self::RectRounded,
        Self::RectRot,
        Self::Star,
        Self::Triangle,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Cross => "cross",
            Self::CrossRot => "crossRot",
            Self::Dash => "dash",
            Self::Line => "line",
            Self::Rect => "rect",
            Self::RectRounded => "rectRounded",
            Self::RectRot => "rectRot",
            Self::Star => "star",
            Self::Triangle => "triangle",
        }
    }
}

/// Point shape: a named style or a host drawable.
#[derive(Debug, Clone, PartialEq)]
pub enum PointStyle {
    Named(PointStyleType),
    Image(ImageRef),
    Canvas(CanvasRef),
}

impl UnionValue for PointStyle {
    fn decode(value: &Value) -> Option<Self> {
        match value {
            Value::Image(image) => Some(Self::Image(image.clone())),
            Value::Canvas(canvas) => Some(Self::Canvas(canvas.clone())),
            Value::String(token) => PointStyleType::from_token(token).map(Self::Named),
            _ => None,
        }
    }

    fn encode(self) -> Value {
        match self {
            Self::Named(style) => Value::String(style.token().to_owned()),
            Self::Image(image) => Value::Image(image),
            Self::Canvas(canvas) => Value::Canvas(canvas),
        }
    }
}

/// Font line height: a multiplier of the font size or a CSS length string.
#[derive(Debug, Clone, PartialEq)]
pub enum LineHeight {
    Factor(f64),
    Css(String),
}

impl UnionValue for LineHeight {
    fn decode(value: &Value) -> Option<Self> {
        match value {
            Value::Number(factor) => Some(Self::Factor(*factor)),
            Value::String(css) => Some(Self::Css(css.clone())),
            _ => None,
        }
    }

    fn encode(self) -> Value {
        match self {
            Self::Factor(factor) => Value::Number(factor),
            Self::Css(css) => Value::String(css),
        }
    }
}
