//! Input node
//!
//! Entry point of a flow: exposes the request payload handed to the
//! executor. It has no inputs.

use flow_graph::{ComponentCategory, ComponentDescriptor, ComponentMetadata, PortMetadata, SocketType};

/// The flow's request payload
pub struct FlowInput;

impl FlowInput {
    /// Component name
    pub const NAME: &'static str = "Input";
    /// Port ID for the payload output
    pub const PORT_PAYLOAD: &'static str = "payload";
}

impl ComponentDescriptor for FlowInput {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Input)
            .describe("Payload supplied when the flow is invoked")
            .output(PortMetadata::output(Self::PORT_PAYLOAD, "REST Payload", SocketType::Json))
    }
}
