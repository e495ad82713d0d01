//! Text, JSON and template constants

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};

/// Text constant
pub struct TextValue;

impl TextValue {
    pub const NAME: &'static str = "Text";
    pub const PORT_TXT: &'static str = "txt";
}

impl ComponentDescriptor for TextValue {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Value)
            .describe("Text constant")
            .control(Self::PORT_TXT, ControlKind::Text)
            .output(PortMetadata::output(Self::PORT_TXT, "Text", SocketType::String))
    }
}

/// JSON constant
pub struct JsonValue;

impl JsonValue {
    pub const NAME: &'static str = "JSON";
    pub const PORT_JSON: &'static str = "json";
}

impl ComponentDescriptor for JsonValue {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Value)
            .describe("JSON constant")
            .control(Self::PORT_JSON, ControlKind::Json)
            .output(PortMetadata::output(Self::PORT_JSON, "JSON Payload", SocketType::Json))
    }
}

/// Template source, fed into a Handlebars node
pub struct TemplateValue;

impl TemplateValue {
    pub const NAME: &'static str = "Template";
    pub const PORT_TEMPLATE: &'static str = "template";
}

impl ComponentDescriptor for TemplateValue {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Value)
            .describe("Template source for a Handlebars node")
            .control(Self::PORT_TEMPLATE, ControlKind::Template)
            .output(PortMetadata::output(Self::PORT_TEMPLATE, "Template", SocketType::Template))
    }
}
