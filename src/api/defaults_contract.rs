use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::ChartOptions;
use crate::core::value::json_kind;
use crate::core::{DefaultsProvider, LayeredDefaults, Node, NoDefaults, ObjectRef, StoreDefaults};
use crate::error::{OptionsError, OptionsResult};

pub const DEFAULTS_JSON_SCHEMA_V1: u32 = 1;

const SCHEMA_VERSION_FIELD: &str = "schema_version";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsJsonContractV1 {
    pub schema_version: u32,
    #[serde(default)]
    pub global: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub overrides: IndexMap<String, serde_json::Value>,
}

/// Library-wide defaults plus per-chart-type overrides.
///
/// Each section is a live store: edits made through [`DefaultsSnapshot::global`]
/// or [`DefaultsSnapshot::chart_type`] are seen by every provider built from
/// this snapshot.
#[derive(Debug, Clone, Default)]
pub struct DefaultsSnapshot {
    global: ObjectRef,
    overrides: IndexMap<String, ObjectRef>,
}

impl DefaultsSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses either the versioned contract or a bare global defaults object.
    pub fn from_json_compat_str(input: &str) -> OptionsResult<Self> {
        let json: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            OptionsError::InvalidData(format!("failed to parse defaults json payload: {e}"))
        })?;
        let map = match json {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(OptionsError::InvalidData(format!(
                    "defaults json root must be an object, found {}",
                    json_kind(&other)
                )));
            }
        };
        if !map.contains_key(SCHEMA_VERSION_FIELD) {
            return Ok(Self {
                global: ObjectRef::from_json_map(&map),
                overrides: IndexMap::new(),
            });
        }

        let payload: DefaultsJsonContractV1 =
            serde_json::from_value(serde_json::Value::Object(map)).map_err(|e| {
                OptionsError::InvalidData(format!("failed to parse defaults contract: {e}"))
            })?;
        if payload.schema_version != DEFAULTS_JSON_SCHEMA_V1 {
            return Err(OptionsError::UnsupportedSchemaVersion(
                payload.schema_version,
            ));
        }

        let mut overrides = IndexMap::with_capacity(payload.overrides.len());
        for (chart_type, section) in payload.overrides {
            match section {
                serde_json::Value::Object(section) => {
                    overrides.insert(chart_type, ObjectRef::from_json_map(&section));
                }
                other => warn!(
                    chart_type = %chart_type,
                    found = json_kind(&other),
                    "dropping non-object defaults override"
                ),
            }
        }
        Ok(Self {
            global: ObjectRef::from_json_map(&payload.global),
            overrides,
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> OptionsResult<String> {
        let global = match self.global.to_json() {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        let payload = DefaultsJsonContractV1 {
            schema_version: DEFAULTS_JSON_SCHEMA_V1,
            global,
            overrides: self
                .overrides
                .iter()
                .map(|(chart_type, section)| (chart_type.clone(), section.to_json()))
                .collect(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            OptionsError::InvalidData(format!("failed to serialize defaults contract v1: {e}"))
        })
    }

    /// Typed editor over the global defaults.
    #[must_use]
    pub fn global(&self) -> ChartOptions {
        ChartOptions::from_node(Node::with_store(self.global.clone(), Rc::new(NoDefaults)))
    }

    /// Typed editor over the overrides of one chart type, created on demand.
    #[must_use]
    pub fn chart_type(&mut self, chart_type: &str) -> ChartOptions {
        let store = self
            .overrides
            .entry(chart_type.to_owned())
            .or_default()
            .clone();
        ChartOptions::from_node(Node::with_store(store, Rc::new(NoDefaults)))
    }

    #[must_use]
    pub fn chart_types(&self) -> Vec<String> {
        self.overrides.keys().cloned().collect()
    }

    /// Provider for charts of `chart_type`: its overrides first, then global.
    #[must_use]
    pub fn provider(&self, chart_type: Option<&str>) -> Rc<dyn DefaultsProvider> {
        let mut layered = LayeredDefaults::new();
        if let Some(section) = chart_type.and_then(|chart_type| self.overrides.get(chart_type)) {
            layered = layered.with_layer(Rc::new(StoreDefaults::new(section.clone())));
        }
        Rc::new(layered.with_layer(Rc::new(StoreDefaults::new(self.global.clone()))))
    }

    /// Root options for a new chart of `chart_type`, backed by these defaults.
    #[must_use]
    pub fn options_for(&self, chart_type: Option<&str>) -> ChartOptions {
        ChartOptions::new(self.provider(chart_type))
    }
}
