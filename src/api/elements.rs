use crate::core::{Key, Node, PointStyle, PointStyleType};

/// Element defaults container (`elements`).
#[derive(Debug, Clone)]
pub struct Elements {
    node: Node,
}

impl Elements {
    pub const POINT: Key = Key::new("point");

    pub const KEYS: &'static [Key] = &[Self::POINT];

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn point(&self) -> PointElement {
        PointElement::new(self.node.child(Self::POINT))
    }
}

/// Point element options (`elements.point`).
#[derive(Debug, Clone)]
pub struct PointElement {
    node: Node,
}

impl PointElement {
    pub const RADIUS: Key = Key::new("radius");
    pub const HOVER_RADIUS: Key = Key::new("hoverRadius");
    pub const ROTATION: Key = Key::new("rotation");
    pub const BORDER_WIDTH: Key = Key::new("borderWidth");
    pub const BACKGROUND_COLOR: Key = Key::new("backgroundColor");
    pub const POINT_STYLE: Key = Key::new("pointStyle");

    pub const KEYS: &'static [Key] = &[
        Self::RADIUS,
        Self::HOVER_RADIUS,
        Self::ROTATION,
        Self::BORDER_WIDTH,
        Self::BACKGROUND_COLOR,
        Self::POINT_STYLE,
    ];

    pub const DEFAULT_RADIUS: f64 = 3.0;
    pub const DEFAULT_HOVER_RADIUS: f64 = 4.0;
    pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;
    pub const DEFAULT_BACKGROUND_COLOR: &'static str = "rgba(0,0,0,0.1)";

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Negative radii are stored as `0`.
    pub fn set_radius(&self, radius: f64) {
        self.node.set_pixels(&Self::RADIUS, radius);
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.node
            .get_or(&Self::RADIUS, Self::DEFAULT_RADIUS)
            .unwrap_or(f64::NAN)
    }

    pub fn set_hover_radius(&self, radius: f64) {
        self.node.set_pixels(&Self::HOVER_RADIUS, radius);
    }

    #[must_use]
    pub fn hover_radius(&self) -> f64 {
        self.node
            .get_or(&Self::HOVER_RADIUS, Self::DEFAULT_HOVER_RADIUS)
            .unwrap_or(f64::NAN)
    }

    /// Degrees.
    pub fn set_rotation(&self, rotation: f64) {
        self.node.set_number(&Self::ROTATION, rotation);
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.node
            .get_or(&Self::ROTATION, 0.0)
            .unwrap_or(f64::NAN)
    }

    /// Negative widths are stored as `0`.
    pub fn set_border_width(&self, width: f64) {
        self.node.set_pixels(&Self::BORDER_WIDTH, width);
    }

    #[must_use]
    pub fn border_width(&self) -> f64 {
        self.node
            .get_or(&Self::BORDER_WIDTH, Self::DEFAULT_BORDER_WIDTH)
            .unwrap_or(f64::NAN)
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

    pub fn set_point_style(&self, style: PointStyle) {
        self.node.set_union(&Self::POINT_STYLE, style);
    }

    #[must_use]
    pub fn point_style(&self) -> Option<PointStyle> {
        self.node.get_union_or(
            &Self::POINT_STYLE,
            PointStyle::Named(PointStyleType::Circle),
        )
    }
}
