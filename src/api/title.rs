use serde::{Deserialize, Serialize};

use crate::api::Font;
use crate::core::{DefaultChain, Key, Node, TokenEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitlePosition {
    Top,
    Left,
    Bottom,
    Right,
}

impl TokenEnum for TitlePosition {
    const VARIANTS: &'static [Self] = &[Self::Top, Self::Left, Self::Bottom, Self::Right];

    fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
        }
    }
}

/// Chart title (`plugins.title`).
#[derive(Debug, Clone)]
pub struct Title {
    node: Node,
}

impl Title {
    pub const DISPLAY: Key = Key::new("display");
    pub const TEXT: Key = Key::new("text");
    pub const COLOR: Key = Key::new("color");
    pub const POSITION: Key = Key::new("position");
    pub const FONT: Key = Key::new("font");

    pub const KEYS: &'static [Key] = &[
        Self::DISPLAY,
        Self::TEXT,
        Self::COLOR,
        Self::POSITION,
        Self::FONT,
    ];

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

    /// Each entry is rendered on its own line.
    pub fn set_text<S: AsRef<str>>(&self, lines: &[S]) {
        self.node.set_strings(&Self::TEXT, lines);
    }

    #[must_use]
    pub fn text(&self) -> Vec<String> {
        self.node
            .get_or(&Self::TEXT, Vec::new())
            .unwrap_or_default()
    }

    pub fn set_color(&self, color: Option<&str>) {
        self.node.set_optional_string(&Self::COLOR, color);
    }

    /// Resolves through the standard chain, then falls back to the title font
    /// color. `None` when the color was explicitly unset.
    #[must_use]
    pub fn color(&self) -> Option<String> {
        let resolved = DefaultChain::standard().resolve_by(
            &self.node,
            &Self::COLOR,
            |value| value.as_str().map(|color| Some(color.to_owned())),
            None,
        )?;
        resolved.or_else(|| self.font().color())
    }

    pub fn set_position(&self, position: TitlePosition) {
        self.node.set_token(&Self::POSITION, position);
    }

    #[must_use]
    pub fn position(&self) -> Option<TitlePosition> {
        self.node
            .get_token_or(&Self::POSITION, TitlePosition::Top)
    }
}
