use serde::{Deserialize, Serialize};

use crate::core::{Key, LineHeight, Node, TokenEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
    Initial,
    Inherit,
}

impl TokenEnum for FontStyle {
    const VARIANTS: &'static [Self] = &[
        Self::Normal,
        Self::Italic,
        Self::Oblique,
        Self::Initial,
        Self::Inherit,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
            Self::Initial => "initial",
            Self::Inherit => "inherit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
    Lighter,
    Bolder,
}

impl TokenEnum for FontWeight {
    const VARIANTS: &'static [Self] = &[Self::Normal, Self::Bold, Self::Lighter, Self::Bolder];

    fn token(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Lighter => "lighter",
            Self::Bolder => "bolder",
        }
    }
}

/// Font sub-object (`font`) shared by titles, labels and ticks.
#[derive(Debug, Clone)]
pub struct Font {
    node: Node,
}

impl Font {
    pub const COLOR: Key = Key::new("color");
    pub const FAMILY: Key = Key::new("family");
    pub const SIZE: Key = Key::new("size");
    pub const STYLE: Key = Key::new("style");
    pub const WEIGHT: Key = Key::new("weight");
    pub const LINE_HEIGHT: Key = Key::new("lineHeight");

    pub const KEYS: &'static [Key] = &[
        Self::COLOR,
        Self::FAMILY,
        Self::SIZE,
        Self::STYLE,
        Self::WEIGHT,
        Self::LINE_HEIGHT,
    ];

    pub const DEFAULT_COLOR: &'static str = "#666";
    pub const DEFAULT_FAMILY: &'static str = "'Helvetica Neue', 'Helvetica', 'Arial', sans-serif";
    pub const DEFAULT_SIZE: f64 = 12.0;
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn set_color(&self, color: impl Into<String>) {
        self.node.set_string(&Self::COLOR, color);
    }

    #[must_use]
    pub fn color(&self) -> Option<String> {
        self.node
            .get_or(&Self::COLOR, Self::DEFAULT_COLOR.to_owned())
    }

    pub fn set_family(&self, family: impl Into<String>) {
        self.node.set_string(&Self::FAMILY, family);
    }

    #[must_use]
    pub fn family(&self) -> Option<String> {
        self.node
            .get_or(&Self::FAMILY, Self::DEFAULT_FAMILY.to_owned())
    }

    /// Negative sizes are stored as `0`.
    pub fn set_size(&self, size: f64) {
        self.node.set_pixels(&Self::SIZE, size);
    }

    /// `NaN` when the size was explicitly unset.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.node
            .get_or(&Self::SIZE, Self::DEFAULT_SIZE)
            .unwrap_or(f64::NAN)
    }

    pub fn set_style(&self, style: FontStyle) {
        self.node.set_token(&Self::STYLE, style);
    }

    #[must_use]
    pub fn style(&self) -> Option<FontStyle> {
        self.node.get_token_or(&Self::STYLE, FontStyle::Normal)
    }

    pub fn set_weight(&self, weight: FontWeight) {
        self.node.set_token(&Self::WEIGHT, weight);
    }

    #[must_use]
    pub fn weight(&self) -> Option<FontWeight> {
        self.node.get_token_or(&Self::WEIGHT, FontWeight::Normal)
    }

    pub fn set_line_height(&self, line_height: LineHeight) {
        self.node.set_union(&Self::LINE_HEIGHT, line_height);
    }

    #[must_use]
    pub fn line_height(&self) -> Option<LineHeight> {
        self.node.get_union_or(
            &Self::LINE_HEIGHT,
            LineHeight::Factor(Self::DEFAULT_LINE_HEIGHT),
        )
    }

    /// CSS `font` shorthand, e.g. `"italic bold 14px/1.5 serif"`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut parts = Vec::new();
        if let Some(style) = self.style().filter(|style| *style != FontStyle::Normal) {
            parts.push(style.token().to_owned());
        }
        if let Some(weight) = self.weight().filter(|weight| *weight != FontWeight::Normal) {
            parts.push(weight.token().to_owned());
        }
        let size = self.size();
        let size = if size.is_finite() {
            size
        } else {
            Self::DEFAULT_SIZE
        };
        let line_height = match self.line_height() {
            Some(LineHeight::Factor(factor)) if factor.is_finite() => format!("/{factor}"),
            Some(LineHeight::Css(css)) => format!("/{css}"),
            _ => String::new(),
        };
        parts.push(format!("{size}px{line_height}"));
        parts.push(self.family().unwrap_or_else(|| Self::DEFAULT_FAMILY.to_owned()));
        parts.join(" ")
    }
}
