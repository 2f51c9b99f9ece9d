use std::rc::Rc;

use tracing::debug;

use crate::api::{Elements, Font, Title};
use crate::core::{DefaultsProvider, Key, Node, ObjectRef};
use crate::error::OptionsResult;
use crate::extensions::AnnotationPlugin;

/// Root of a chart's `options` object.
///
/// Every accessor returns a lazily attached wrapper: nothing is added to the
/// options object until a value is set through it.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    node: Node,
}

impl ChartOptions {
    pub const RESPONSIVE: Key = Key::new("responsive");
    pub const ASPECT_RATIO: Key = Key::new("aspectRatio");
    pub const LOCALE: Key = Key::new("locale");
    pub const FONT: Key = Key::new("font");
    pub const ELEMENTS: Key = Key::new("elements");
    pub const PLUGINS: Key = Key::new("plugins");

    pub const KEYS: &'static [Key] = &[
        Self::RESPONSIVE,
        Self::ASPECT_RATIO,
        Self::LOCALE,
        Self::FONT,
        Self::ELEMENTS,
        Self::PLUGINS,
    ];

    pub const DEFAULT_ASPECT_RATIO: f64 = 2.0;
    pub const DEFAULT_LOCALE: &'static str = "en-US";

    #[must_use]
    pub fn new(defaults: Rc<dyn DefaultsProvider>) -> Self {
        Self {
            node: Node::root(defaults),
        }
    }

    /// Options with no injected defaults; every getter ends at its constant.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            node: Node::detached(),
        }
    }

    /// Wraps an existing options object.
    #[must_use]
    pub fn with_store(store: ObjectRef, defaults: Rc<dyn DefaultsProvider>) -> Self {
        Self {
            node: Node::with_store(store, defaults),
        }
    }

    pub fn from_json_str(input: &str, defaults: Rc<dyn DefaultsProvider>) -> OptionsResult<Self> {
        Ok(Self {
            node: Node::from_json_str(input, defaults)?,
        })
    }

    #[must_use]
    pub fn from_node(node: Node) -> Self {
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

    #[must_use]
    pub fn elements(&self) -> Elements {
        Elements::new(self.node.child(Self::ELEMENTS))
    }

    #[must_use]
    pub fn plugins(&self) -> Plugins {
        Plugins::new(self.node.child(Self::PLUGINS))
    }

    /// Shorthand for `plugins().title()`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.plugins().title()
    }

    pub fn set_responsive(&self, responsive: bool) {
        self.node.set_bool(&Self::RESPONSIVE, responsive);
    }

    #[must_use]
    pub fn responsive(&self) -> bool {
        self.node
            .get_or(&Self::RESPONSIVE, true)
            .unwrap_or(true)
    }

    /// Non-positive ratios are ignored by the renderer; they are stored as the
    /// default ratio instead.
    pub fn set_aspect_ratio(&self, ratio: f64) {
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            debug!(ratio, "invalid aspect ratio, using default");
            Self::DEFAULT_ASPECT_RATIO
        };
        self.node.set_number(&Self::ASPECT_RATIO, ratio);
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.node
            .get_or(&Self::ASPECT_RATIO, Self::DEFAULT_ASPECT_RATIO)
            .unwrap_or(f64::NAN)
    }

    pub fn set_locale(&self, locale: Option<&str>) {
        self.node.set_optional_string(&Self::LOCALE, locale);
    }

    #[must_use]
    pub fn locale(&self) -> Option<String> {
        self.node
            .get_or(&Self::LOCALE, Self::DEFAULT_LOCALE.to_owned())
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.node.to_json()
    }

    pub fn to_json_pretty(&self) -> OptionsResult<String> {
        self.node.to_json_pretty()
    }
}

/// Per-plugin options (`plugins`).
#[derive(Debug, Clone)]
pub struct Plugins {
    node: Node,
}

impl Plugins {
    pub const TITLE: Key = Key::new("title");
    pub const ANNOTATION: Key = Key::new("annotation");

    pub const KEYS: &'static [Key] = &[Self::TITLE, Self::ANNOTATION];

    #[must_use]
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn title(&self) -> Title {
        Title::new(self.node.child(Self::TITLE))
    }

    #[must_use]
    pub fn annotation(&self) -> AnnotationPlugin {
        AnnotationPlugin::new(self.node.child(Self::ANNOTATION))
    }

    /// Disables a plugin for this chart by storing `false` under its id.
    pub fn disable(&self, plugin_id: &str) -> OptionsResult<()> {
        self.node.set_bool(&Key::parse(plugin_id)?, false);
        Ok(())
    }

    /// A plugin is enabled unless `false` is stored under its id, here or in
    /// the injected defaults. Option objects under the id do not disable it.
    #[must_use]
    pub fn is_enabled(&self, plugin_id: &str) -> bool {
        let Ok(key) = Key::parse(plugin_id) else {
            return false;
        };
        self.node.get_or(&key, true).unwrap_or(true)
    }
}
