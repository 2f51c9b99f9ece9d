//! Plugin option schemas that live outside the core chart options.
//!
//! Each plugin hangs off `plugins.<id>` and is reached through
//! [`Plugins`](crate::api::Plugins).

pub mod annotation;
pub mod control_point;
pub mod label;

pub use annotation::{AnnotationPlugin, LineAnnotation};
pub use control_point::ControlPoint;
pub use label::{LabelPosition, LineLabel, TextAlign};
