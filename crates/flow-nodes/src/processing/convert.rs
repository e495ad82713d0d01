//! Conversions of any data value to a fixed type

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};
use serde_json::{Map, Value};

use super::non_empty;

/// Port ID of the value to convert
pub const PORT_DATA: &str = "data";
/// Control key for the wrapping key of JSON conversions
pub const CONTROL_NAME: &str = "name";

fn conversion(name: &str, description: &str, output: PortMetadata) -> ComponentMetadata {
    ComponentMetadata::new(name, ComponentCategory::Processing)
        .describe(description)
        .input(PortMetadata::input(PORT_DATA, "Data", SocketType::Any))
        .output(output)
}

/// Wrap a value into a JSON object under a named key
pub struct ToJson;

impl ToJson {
    pub const NAME: &'static str = "ToJson";
    pub const PORT_JSON: &'static str = "json";

    /// Key the converted value is stored under; `data` when empty
    pub fn wrap_key(data: &Map<String, Value>) -> String {
        non_empty(data, CONTROL_NAME).unwrap_or(PORT_DATA).to_string()
    }

    /// Wrap a value under the node's key
    pub fn wrap(data: &Map<String, Value>, value: Value) -> Value {
        let mut object = Map::new();
        object.insert(Self::wrap_key(data), value);
        Value::Object(object)
    }
}

impl ComponentDescriptor for ToJson {
    fn descriptor() -> ComponentMetadata {
        conversion(
            Self::NAME,
            "Wrap a value into a JSON object",
            PortMetadata::output(Self::PORT_JSON, "JSON Payload", SocketType::Json),
        )
        .control(CONTROL_NAME, ControlKind::Name)
    }
}

/// Parse a value into JSON under a named key
pub struct Convert;

impl Convert {
    pub const NAME: &'static str = "Convert";
    pub const PORT_JSON: &'static str = "json";
}

impl ComponentDescriptor for Convert {
    fn descriptor() -> ComponentMetadata {
        conversion(
            Self::NAME,
            "Convert a value to JSON",
            PortMetadata::output(Self::PORT_JSON, "JSON Payload", SocketType::Json),
        )
        .control(CONTROL_NAME, ControlKind::Name)
    }
}

pub struct ToNumber;

impl ToNumber {
    pub const NAME: &'static str = "ToNumber";
    pub const PORT_NUM: &'static str = "num";
}

impl ComponentDescriptor for ToNumber {
    fn descriptor() -> ComponentMetadata {
        conversion(
            Self::NAME,
            "Convert a value to an integer",
            PortMetadata::output(Self::PORT_NUM, "Number", SocketType::Number),
        )
    }
}

pub struct ToFloat;

impl ToFloat {
    pub const NAME: &'static str = "ToFloat";
    pub const PORT_FLOAT: &'static str = "float";
}

impl ComponentDescriptor for ToFloat {
    fn descriptor() -> ComponentMetadata {
        conversion(
            Self::NAME,
            "Convert a value to a float",
            PortMetadata::output(Self::PORT_FLOAT, "Float", SocketType::Float),
        )
    }
}

pub struct ToText;

impl ToText {
    pub const NAME: &'static str = "ToText";
    pub const PORT_TXT: &'static str = "txt";
}

impl ComponentDescriptor for ToText {
    fn descriptor() -> ComponentMetadata {
        conversion(
            Self::NAME,
            "Convert a value to text",
            PortMetadata::output(Self::PORT_TXT, "Text", SocketType::String),
        )
    }
}
