use serde::{Deserialize, Serialize};

use crate::api::Font;
use crate::core::{
    CanvasRef, Content, Dimension, ImageRef, Key, Node, PercentageRange, TokenEnum, UnionValue,
    Value, ValueType, decode_percentage, encode_percentage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAlign {
    Start,
    Center,
    End,
    Left,
    Right,
}

impl TokenEnum for TextAlign {
    const VARIANTS: &'static [Self] = &[
        Self::Start,
        Self::Center,
        Self::End,
        Self::Left,
        Self::Right,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Where a label sits along its line: a named anchor or a fraction of the
/// line length stored as a percentage string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelPosition {
    Start,
    Center,
    End,
    Percentage(f64),
}

impl LabelPosition {
    pub const DEFAULT_PERCENTAGE: f64 = 0.5;
}

impl UnionValue for LabelPosition {
    fn decode(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            other => decode_percentage(other).map(Self::Percentage),
        }
    }

    fn encode(self) -> Value {
        let token = match self {
            Self::Start => "start".to_owned(),
            Self::Center => "center".to_owned(),
            Self::End => "end".to_owned(),
            Self::Percentage(fraction) => {
                encode_percentage(fraction, PercentageRange::UNIT, Self::DEFAULT_PERCENTAGE)
            }
        };
        Value::String(token)
    }
}

/// Label drawn along a line annotation (`label`).
#[derive(Debug, Clone)]
pub struct LineLabel {
    node: Node,
}

impl LineLabel {
    pub const DISPLAY: Key = Key::new("display");
    pub const BACKGROUND_COLOR: Key = Key::new("backgroundColor");
    pub const COLOR: Key = Key::new("color");
    pub const CONTENT: Key = Key::new("content");
    pub const POSITION: Key = Key::new("position");
    pub const WIDTH: Key = Key::new("width");
    pub const HEIGHT: Key = Key::new("height");
    pub const TEXT_ALIGN: Key = Key::new("textAlign");
    pub const FONT: Key = Key::new("font");

    pub const KEYS: &'static [Key] = &[
        Self::DISPLAY,
        Self::BACKGROUND_COLOR,
        Self::COLOR,
        Self::CONTENT,
        Self::POSITION,
        Self::WIDTH,
        Self::HEIGHT,
        Self::TEXT_ALIGN,
        Self::FONT,
    ];

    pub const DEFAULT_BACKGROUND_COLOR: &'static str = "rgba(0,0,0,0.8)";
    pub const DEFAULT_COLOR: &'static str = "#fff";

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn font(&self) -> Font {
        Font::new(self.node.child(Self::FONT))
    }

    pub fn set_display(&self, display: bool) {
        self.node.set_bool(&Self::DISPLAY, display);
    }

    #[must_use]
    pub fn display(&self) -> bool {
        self.node
            .get_or(&Self::DISPLAY, false)
            .unwrap_or(false)
    }

    pub fn set_background_color(&self, color: impl Into<String>) {
        self.node.set_string(&Self::BACKGROUND_COLOR, color);
    }

    #[must_use]
    pub fn background_color(&self) -> Option<String> {
        self.node.get_or(
            &Self::BACKGROUND_COLOR,
            Self::DEFAULT_BACKGROUND_COLOR.to_owned(),
        )
    }

    pub fn set_color(&self, color: impl Into<String>) {
        self.node.set_string(&Self::COLOR, color);
    }

    #[must_use]
    pub fn color(&self) -> Option<String> {
        self.node
            .get_or(&Self::COLOR, Self::DEFAULT_COLOR.to_owned())
    }

    pub fn set_content(&self, content: Content) {
        self.node.set_union(&Self::CONTENT, content);
    }

    /// Each entry is rendered on its own line; one entry is stored as a plain
    /// string.
    pub fn set_content_lines<S: AsRef<str>>(&self, lines: &[S]) {
        self.node.set_strings(&Self::CONTENT, lines);
    }

    pub fn set_content_image(&self, image: ImageRef) {
        self.set_content(Content::Image(image));
    }

    pub fn set_content_canvas(&self, canvas: CanvasRef) {
        self.set_content(Content::Canvas(canvas));
    }

    pub fn remove_content(&self) {
        self.node.remove(&Self::CONTENT);
    }

    #[must_use]
    pub fn content(&self) -> Option<Content> {
        self.node.get_union(&Self::CONTENT)
    }

    #[must_use]
    pub fn content_type(&self) -> ValueType {
        self.node.value_type(&Self::CONTENT)
    }

    /// Text lines; `None` when the content is a drawable or unset.
    #[must_use]
    pub fn content_lines(&self) -> Option<Vec<String>> {
        self.content().and_then(|content| content.lines())
    }

    #[must_use]
    pub fn content_as_image(&self) -> Option<ImageRef> {
        match self.content()? {
            Content::Image(image) => Some(image),
            _ => None,
        }
    }

    #[must_use]
    pub fn content_as_canvas(&self) -> Option<CanvasRef> {
        match self.content()? {
            Content::Canvas(canvas) => Some(canvas),
            _ => None,
        }
    }

    pub fn set_position(&self, position: LabelPosition) {
        self.node.set_union(&Self::POSITION, position);
    }

    #[must_use]
    pub fn position(&self) -> Option<LabelPosition> {
        self.node
            .get_union_or(&Self::POSITION, LabelPosition::Center)
    }

    /// Fraction of the line length; `None` when the position is a named
    /// anchor or unset.
    #[must_use]
    pub fn position_as_percentage(&self) -> Option<f64> {
        self.node.get_percentage(&Self::POSITION)
    }

    /// Drawable width in pixels or as a fraction of its natural width.
    pub fn set_width(&self, width: Dimension) {
        self.node.set_union(&Self::WIDTH, width);
    }

    #[must_use]
    pub fn width(&self) -> Option<Dimension> {
        self.node.get_union(&Self::WIDTH)
    }

    pub fn set_height(&self, height: Dimension) {
        self.node.set_union(&Self::HEIGHT, height);
    }

    #[must_use]
    pub fn height(&self) -> Option<Dimension> {
        self.node.get_union(&Self::HEIGHT)
    }

    pub fn set_text_align(&self, align: TextAlign) {
        self.node.set_token(&Self::TEXT_ALIGN, align);
    }

    #[must_use]
    pub fn text_align(&self) -> Option<TextAlign> {
        self.node
            .get_token_or(&Self::TEXT_ALIGN, TextAlign::Center)
    }
}
