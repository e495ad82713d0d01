//! Output node
//!
//! The flow's result: a JSON payload and an HTTP-style status code. The
//! status port hosts a number control, seeded with 200.

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};
use serde_json::json;

use crate::constants::DEFAULT_STATUS;

/// The flow's externally visible result
pub struct FlowOutput;

impl FlowOutput {
    /// Component name
    pub const NAME: &'static str = "Output";
    /// Port ID for the result payload
    pub const PORT_PAYLOAD: &'static str = "payload";
    /// Port ID (and control key) for the status code
    pub const PORT_STATUS: &'static str = "status";
}

impl ComponentDescriptor for FlowOutput {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Output)
            .describe("Result payload and status code of the flow")
            .input(PortMetadata::input(Self::PORT_PAYLOAD, "REST Payload", SocketType::Json))
            .input(
                PortMetadata::input(Self::PORT_STATUS, "Status Code", SocketType::Number)
                    .with_control(ControlKind::Number),
            )
            .default_value(Self::PORT_STATUS, json!(DEFAULT_STATUS))
    }
}
