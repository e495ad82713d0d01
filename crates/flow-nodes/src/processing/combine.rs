//! Combine node
//!
//! Merges up to four values into one JSON object. Each `dataN` input is
//! paired with a `nameN` control giving its key in the result; an empty
//! name falls back to the port name.

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};
use serde_json::{Map, Value};

use super::non_empty;

/// Number of slots
pub const SLOTS: usize = 4;

pub struct Combine;

impl Combine {
    pub const NAME: &'static str = "Combine";
    /// Input port IDs, also the fallback keys
    pub const PORT_DATA: [&'static str; SLOTS] = ["data1", "data2", "data3", "data4"];
    /// Control keys naming each input
    pub const CONTROL_NAMES: [&'static str; SLOTS] = ["name1", "name2", "name3", "name4"];
    pub const PORT_JSON: &'static str = "json";

    /// Key each slot is stored under
    pub fn resolved_names(data: &Map<String, Value>) -> [String; SLOTS] {
        std::array::from_fn(|i| {
            non_empty(data, Self::CONTROL_NAMES[i])
                .unwrap_or(Self::PORT_DATA[i])
                .to_string()
        })
    }

    /// Merge all four inputs under their resolved names
    ///
    /// An unconnected slot holds `{}`; when two slots resolve to the same
    /// name the later one wins.
    pub fn assemble(data: &Map<String, Value>, inputs: [Option<Value>; SLOTS]) -> Value {
        let names = Self::resolved_names(data);
        let merged: Map<String, Value> = names
            .into_iter()
            .zip(inputs)
            .map(|(name, value)| (name, value.unwrap_or_else(|| Value::Object(Map::new()))))
            .collect();
        Value::Object(merged)
    }
}

impl ComponentDescriptor for Combine {
    fn descriptor() -> ComponentMetadata {
        let labels = [
            "Data 1 (data1 if no name)",
            "Data 2 (data2 if no name)",
            "Data 3 (data3 if no name)",
            "Data 4 (data4 if no name)",
        ];
        let mut meta = ComponentMetadata::new(Self::NAME, ComponentCategory::Processing)
            .describe("Merge up to four values into one object");
        for key in Self::CONTROL_NAMES {
            meta = meta.control(key, ControlKind::Name);
        }
        for (port, label) in Self::PORT_DATA.into_iter().zip(labels) {
            meta = meta.input(PortMetadata::input(port, label, SocketType::Any));
        }
        meta.output(PortMetadata::output(Self::PORT_JSON, "JSON Payload", SocketType::Json))
    }
}
