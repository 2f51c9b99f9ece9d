//! Representative Chart.js option schemas built on the property tree, and the
//! JSON contract for default registries.

mod defaults_contract;
mod elements;
mod font;
mod options;
mod title;

pub use defaults_contract::{DEFAULTS_JSON_SCHEMA_V1, DefaultsJsonContractV1, DefaultsSnapshot};
pub use elements::{Elements, PointElement};
pub use font::{Font, FontStyle, FontWeight};
pub use options::{ChartOptions, Plugins};
pub use title::{Title, TitlePosition};
