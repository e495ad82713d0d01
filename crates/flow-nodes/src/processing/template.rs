//! Template rendering nodes

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};

pub const PORT_PAYLOAD: &str = "payload";
pub const PORT_TEMPLATE: &str = "template";

/// Renders a template received from a Template node
///
/// Yields the rendered text and, when it parses, the same text as JSON.
pub struct Handlebars;

impl Handlebars {
    pub const NAME: &'static str = "Handlebars";
    pub const PORT_OUTPUT: &'static str = "output";
    pub const PORT_JSON: &'static str = "json";
}

impl ComponentDescriptor for Handlebars {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Processing)
            .describe("Render a template against a JSON payload")
            .input(PortMetadata::input(PORT_PAYLOAD, "Json Payload", SocketType::Json))
            .input(PortMetadata::input(PORT_TEMPLATE, "Template", SocketType::Template))
            .output(PortMetadata::output(Self::PORT_OUTPUT, "Text Output", SocketType::String))
            .output(PortMetadata::output(Self::PORT_JSON, "JSON Output", SocketType::Json))
    }
}

/// Renders a JSON template held in a control on its template port
pub struct JsonTemplate;

impl JsonTemplate {
    pub const NAME: &'static str = "JsonTemplate";
    pub const PORT_JSON: &'static str = "json";
}

impl ComponentDescriptor for JsonTemplate {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Processing)
            .describe("Render a JSON template against a JSON payload")
            .input(PortMetadata::input(PORT_PAYLOAD, "Json Payload", SocketType::Json))
            .input(
                PortMetadata::input(PORT_TEMPLATE, "Template", SocketType::String)
                    .with_control(ControlKind::Name),
            )
            .output(PortMetadata::output(Self::PORT_JSON, "Json", SocketType::String))
    }
}
