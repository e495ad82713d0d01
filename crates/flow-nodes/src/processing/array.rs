//! Array aggregates
//!
//! Each takes one JSON payload (an array at execution time) plus, for
//! some, a field name or index, and yields one value.

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};
use serde_json::{Map, Value};

use super::non_empty;

/// Port ID for the array payload shared by every aggregate
pub const PORT_PAYLOAD: &str = "payload";
/// Port ID for JSON results
pub const PORT_JSON: &str = "json";

fn aggregate(name: &str, description: &str, payload_label: &str) -> ComponentMetadata {
    ComponentMetadata::new(name, ComponentCategory::Processing)
        .describe(description)
        .input(PortMetadata::input(PORT_PAYLOAD, payload_label, SocketType::Json))
}

/// Number of elements
pub struct ArrayCount;

impl ArrayCount {
    pub const NAME: &'static str = "Array Count";
    pub const PORT_NUM: &'static str = "num";
}

impl ComponentDescriptor for ArrayCount {
    fn descriptor() -> ComponentMetadata {
        aggregate(Self::NAME, "Number of elements in an array", "JSON Payload")
            .output(PortMetadata::output(Self::PORT_NUM, "Count", SocketType::Number))
    }
}

/// How an `Array Sum` node adds up its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumMode {
    /// Sum the array elements themselves
    Elements,
    /// Sum the named field of each element
    Field(String),
}

/// Sum of the elements, or of one field of each element
pub struct ArraySum;

impl ArraySum {
    pub const NAME: &'static str = "Array Sum";
    /// Port ID (and control key) for the field name
    pub const PORT_FIELD: &'static str = "field";
    pub const PORT_FLOAT: &'static str = "float";

    /// Summing mode for a node's data; an empty field sums the elements
    pub fn field_mode(data: &Map<String, Value>) -> SumMode {
        match non_empty(data, Self::PORT_FIELD) {
            Some(field) => SumMode::Field(field.to_string()),
            None => SumMode::Elements,
        }
    }
}

impl ComponentDescriptor for ArraySum {
    fn descriptor() -> ComponentMetadata {
        aggregate(Self::NAME, "Sum of an array or of one field per element", "JSON Payload")
            .input(
                PortMetadata::input(Self::PORT_FIELD, "Field Name(Empty if no field)", SocketType::String)
                    .with_control(ControlKind::Name),
            )
            .output(PortMetadata::output(Self::PORT_FLOAT, "Sum Float", SocketType::Float))
    }
}

/// One level of nested arrays flattened
pub struct ArrayFlatten;

impl ArrayFlatten {
    pub const NAME: &'static str = "Array Flatten";
}

impl ComponentDescriptor for ArrayFlatten {
    fn descriptor() -> ComponentMetadata {
        aggregate(Self::NAME, "Flatten nested arrays", "JSON Payload")
            .output(PortMetadata::output(PORT_JSON, "JSON Payload", SocketType::Json))
    }
}

/// First element
pub struct ArrayHead;

impl ArrayHead {
    pub const NAME: &'static str = "Head";
}

impl ComponentDescriptor for ArrayHead {
    fn descriptor() -> ComponentMetadata {
        aggregate(Self::NAME, "First element of an array", "JSON Array")
            .output(PortMetadata::output(PORT_JSON, "JSON Payload", SocketType::Json))
    }
}

/// Element at an index
pub struct ArrayNth;

impl ArrayNth {
    pub const NAME: &'static str = "Nth";
    /// Port ID (and control key) for the index
    pub const PORT_NTH: &'static str = "nth";
}

impl ComponentDescriptor for ArrayNth {
    fn descriptor() -> ComponentMetadata {
        aggregate(Self::NAME, "Element of an array at an index", "JSON Payload")
            .input(
                PortMetadata::input(Self::PORT_NTH, "Nth element", SocketType::Number)
                    .with_control(ControlKind::Number),
            )
            .output(PortMetadata::output(PORT_JSON, "JSON Payload", SocketType::Json))
    }
}

/// Projection of each element onto a set of fields
pub struct ArrayMap;

impl ArrayMap {
    pub const NAME: &'static str = "Array Map";
    /// Port ID (and control key) for the comma separated field list
    pub const PORT_FIELDS: &'static str = "fields";

    /// Field names held by a node, split on commas with blanks dropped
    pub fn field_list(data: &Map<String, Value>) -> Vec<String> {
        non_empty(data, Self::PORT_FIELDS)
            .map(|fields| {
                fields
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ComponentDescriptor for ArrayMap {
    fn descriptor() -> ComponentMetadata {
        aggregate(Self::NAME, "Keep the listed fields of each element", "JSON Payload")
            .input(
                PortMetadata::input(Self::PORT_FIELDS, "Field Names (comma separated)", SocketType::String)
                    .with_control(ControlKind::Name),
            )
            .output(PortMetadata::output(PORT_JSON, "JSON Payload", SocketType::Json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_blank_field_sums_elements() {
        assert_eq!(ArraySum::field_mode(&Map::new()), SumMode::Elements);
        assert_eq!(ArraySum::field_mode(&data(json!({"field": ""}))), SumMode::Elements);
        assert_eq!(
            ArraySum::field_mode(&data(json!({"field": "  "}))),
            SumMode::Field("  ".to_string())
        );
        assert_eq!(ArraySum::field_mode(&data(json!({"field": null}))), SumMode::Elements);
    }

    #[test]
    fn test_named_field() {
        assert_eq!(
            ArraySum::field_mode(&data(json!({"field": "price"}))),
            SumMode::Field("price".to_string())
        );
    }

    #[test]
    fn test_result_sockets() {
        assert_eq!(ArrayCount::descriptor().outputs[0].socket, SocketType::Number);
        assert_eq!(ArraySum::descriptor().outputs[0].socket, SocketType::Float);
        for meta in [
            ArrayFlatten::descriptor(),
            ArrayHead::descriptor(),
            ArrayNth::descriptor(),
            ArrayMap::descriptor(),
        ] {
            assert_eq!(meta.outputs.len(), 1);
            assert_eq!(meta.outputs[0].socket, SocketType::Json, "{}", meta.name);
            assert_eq!(meta.inputs[0].id, PORT_PAYLOAD);
        }
    }

    #[test]
    fn test_map_field_list() {
        let fields = ArrayMap::field_list(&data(json!({"fields": "id, name,,price "}))); 
        assert_eq!(fields, vec!["id", "name", "price"]);
        assert!(ArrayMap::field_list(&Map::new()).is_empty());
    }
}
