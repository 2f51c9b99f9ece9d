use crate::core::{Dimension, Key, Node, PercentageRange};
use crate::error::OptionsResult;
use crate::extensions::{ControlPoint, LineLabel};

/// Options of the annotation plugin (`plugins.annotation`).
#[derive(Debug, Clone)]
pub struct AnnotationPlugin {
    node: Node,
}

impl AnnotationPlugin {
    pub const ID: &'static str = "annotation";

    pub const ANNOTATIONS: Key = Key::new("annotations");
    pub const CLIP: Key = Key::new("clip");

    pub const KEYS: &'static [Key] = &[Self::ANNOTATIONS, Self::CLIP];

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn set_clip(&self, clip: bool) {
        self.node.set_bool(&Self::CLIP, clip);
    }

    #[must_use]
    pub fn clip(&self) -> bool {
        self.node.get_or(&Self::CLIP, true).unwrap_or(true)
    }

    /// Line annotation stored under `annotations.<id>`.
    ///
    /// The `type` discriminator is written when the annotation's store is
    /// first attached, so an annotation that is never configured leaves no
    /// trace.
    pub fn annotation(&self, id: &str) -> OptionsResult<LineAnnotation> {
        let node = self.node.child(Self::ANNOTATIONS).child_named(id)?;
        node.set_update_listener(|node| {
            if !node.has(&LineAnnotation::TYPE) {
                node.set_string(&LineAnnotation::TYPE, LineAnnotation::TYPE_NAME);
            }
        });
        Ok(LineAnnotation::new(node))
    }

    /// Ids of the configured annotations, in insertion order.
    #[must_use]
    pub fn annotation_ids(&self) -> Vec<String> {
        self.node.child(Self::ANNOTATIONS).keys()
    }

    /// Removes an annotation. Returns `false` when it was not configured.
    pub fn remove_annotation(&self, id: &str) -> OptionsResult<bool> {
        let node = self.node.child(Self::ANNOTATIONS).child_named(id)?;
        Ok(node.remove_self())
    }
}

/// Line annotation, horizontal/vertical via `scaleID` + `value` or free via
/// the `xMin`/`xMax`/`yMin`/`yMax` box.
#[derive(Debug, Clone)]
pub struct LineAnnotation {
    node: Node,
}

impl LineAnnotation {
    pub const TYPE_NAME: &'static str = "line";

    pub const TYPE: Key = Key::new("type");
    pub const X_MIN: Key = Key::new("xMin");
    pub const X_MAX: Key = Key::new("xMax");
    pub const Y_MIN: Key = Key::new("yMin");
    pub const Y_MAX: Key = Key::new("yMax");
    pub const SCALE_ID: Key = Key::new("scaleID");
    pub const VALUE: Key = Key::new("value");
    pub const END_VALUE: Key = Key::new("endValue");
    pub const BORDER_COLOR: Key = Key::new("borderColor");
    pub const BORDER_WIDTH: Key = Key::new("borderWidth");
    pub const CURVE: Key = Key::new("curve");
    pub const CONTROL_POINT: Key = Key::new("controlPoint");
    pub const LABEL: Key = Key::new("label");

    pub const KEYS: &'static [Key] = &[
        Self::TYPE,
        Self::X_MIN,
        Self::X_MAX,
        Self::Y_MIN,
        Self::Y_MAX,
        Self::SCALE_ID,
        Self::VALUE,
        Self::END_VALUE,
        Self::BORDER_COLOR,
        Self::BORDER_WIDTH,
        Self::CURVE,
        Self::CONTROL_POINT,
        Self::LABEL,
    ];

    pub const DEFAULT_BORDER_WIDTH: f64 = 2.0;

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn label(&self) -> LineLabel {
        LineLabel::new(self.node.child(Self::LABEL))
    }

    /// Object form of `controlPoint`. Writing through it replaces a scalar
    /// control point.
    #[must_use]
    pub fn control_point(&self) -> ControlPoint {
        ControlPoint::new(self.node.child(Self::CONTROL_POINT))
    }

    /// Assigns a standalone control point; both wrappers then share its store.
    pub fn set_control_point(&self, point: &ControlPoint) {
        self.node.set_node(&Self::CONTROL_POINT, point.node());
    }

    /// Scalar form of `controlPoint`, applied to both coordinates.
    pub fn set_control_point_scalar(&self, value: Dimension) {
        match value {
            Dimension::Pixels(pixels) => self.node.set_number(&Self::CONTROL_POINT, pixels),
            Dimension::Percentage(fraction) => self.node.set_percentage(
                &Self::CONTROL_POINT,
                fraction,
                PercentageRange::CONTROL_POINT,
                0.0,
            ),
        }
    }

    /// `None` when the control point is unset or stored in object form.
    #[must_use]
    pub fn control_point_scalar(&self) -> Option<Dimension> {
        self.node.get_union(&Self::CONTROL_POINT)
    }

    pub fn set_x_min(&self, value: f64) {
        self.node.set_number(&Self::X_MIN, value);
    }

    #[must_use]
    pub fn x_min(&self) -> Option<f64> {
        self.node.get(&Self::X_MIN)
    }

    pub fn set_x_max(&self, value: f64) {
        self.node.set_number(&Self::X_MAX, value);
    }

    #[must_use]
    pub fn x_max(&self) -> Option<f64> {
        self.node.get(&Self::X_MAX)
    }

    pub fn set_y_min(&self, value: f64) {
        self.node.set_number(&Self::Y_MIN, value);
    }

    #[must_use]
    pub fn y_min(&self) -> Option<f64> {
        self.node.get(&Self::Y_MIN)
    }

    pub fn set_y_max(&self, value: f64) {
        self.node.set_number(&Self::Y_MAX, value);
    }

    #[must_use]
    pub fn y_max(&self) -> Option<f64> {
        self.node.get(&Self::Y_MAX)
    }

    pub fn set_scale_id(&self, scale_id: impl Into<String>) {
        self.node.set_string(&Self::SCALE_ID, scale_id);
    }

    #[must_use]
    pub fn scale_id(&self) -> Option<String> {
        self.node.get(&Self::SCALE_ID)
    }

    pub fn set_value(&self, value: f64) {
        self.node.set_number(&Self::VALUE, value);
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.node.get(&Self::VALUE)
    }

    pub fn set_end_value(&self, value: f64) {
        self.node.set_number(&Self::END_VALUE, value);
    }

    #[must_use]
    pub fn end_value(&self) -> Option<f64> {
        self.node.get(&Self::END_VALUE)
    }

    pub fn set_border_color(&self, color: impl Into<String>) {
        self.node.set_string(&Self::BORDER_COLOR, color);
    }

    #[must_use]
    pub fn border_color(&self) -> Option<String> {
        self.node.get(&Self::BORDER_COLOR)
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

    pub fn set_curve(&self, curve: bool) {
        self.node.set_bool(&Self::CURVE, curve);
    }

    #[must_use]
    pub fn curve(&self) -> bool {
        self.node.get_or(&Self::CURVE, false).unwrap_or(false)
    }
}
