use crate::core::{Dimension, Key, Node, PercentageRange};

/// Curve control point of a line annotation (`controlPoint`).
///
/// Each coordinate is either pixels or a percentage of the line length,
/// accepted within `-1000%..=1000%`.
#[derive(Debug, Clone)]
pub struct ControlPoint {
    node: Node,
}

impl ControlPoint {
    pub const X: Key = Key::new("x");
    pub const Y: Key = Key::new("y");

    pub const KEYS: &'static [Key] = &[Self::X, Self::Y];

    pub const DEFAULT_X_PERCENTAGE: f64 = 0.0;
    pub const DEFAULT_Y_PERCENTAGE: f64 = -0.5;

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// Standalone control point, to be assigned with
    /// [`LineAnnotation::set_control_point`](crate::extensions::LineAnnotation::set_control_point).
    ///
    /// `y` defaults to `-50%` as the plugin does.
    #[must_use]
    pub fn with_pixels(x: f64, y: Option<f64>) -> Self {
        let point = Self::new(Node::detached());
        point.set_x(Dimension::Pixels(x));
        match y {
            Some(y) => point.set_y(Dimension::Pixels(y)),
            None => point.set_y(Dimension::Percentage(Self::DEFAULT_Y_PERCENTAGE)),
        }
        point
    }

    #[must_use]
    pub fn with_percentages(x: f64, y: f64) -> Self {
        let point = Self::new(Node::detached());
        point.set_x(Dimension::Percentage(x));
        point.set_y(Dimension::Percentage(y));
        point
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn set_x(&self, x: Dimension) {
        self.set_coordinate(&Self::X, x, Self::DEFAULT_X_PERCENTAGE);
    }

    pub fn set_y(&self, y: Dimension) {
        self.set_coordinate(&Self::Y, y, Self::DEFAULT_Y_PERCENTAGE);
    }

    #[must_use]
    pub fn x(&self) -> Option<Dimension> {
        self.node
            .get_union_or(&Self::X, Dimension::Percentage(Self::DEFAULT_X_PERCENTAGE))
    }

    #[must_use]
    pub fn y(&self) -> Option<Dimension> {
        self.node
            .get_union_or(&Self::Y, Dimension::Percentage(Self::DEFAULT_Y_PERCENTAGE))
    }

    fn set_coordinate(&self, key: &Key, value: Dimension, default_percentage: f64) {
        match value {
            Dimension::Pixels(pixels) => self.node.set_number(key, pixels),
            Dimension::Percentage(fraction) => self.node.set_percentage(
                key,
                fraction,
                PercentageRange::CONTROL_POINT,
                default_percentage,
            ),
        }
    }
}
