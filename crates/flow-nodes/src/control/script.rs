//! Script node
//!
//! User-authored transformation of a JSON payload, run entirely by the
//! flow executor.

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};

pub struct Script;

impl Script {
    pub const NAME: &'static str = "Script";
    pub const PORT_ACTION: &'static str = "action";
    pub const PORT_PAYLOAD: &'static str = "payload";
    pub const CONTROL_NAME: &'static str = "name";
    /// Control key for the script source
    pub const CONTROL_SRC: &'static str = "src";
}

impl ComponentDescriptor for Script {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Control)
            .describe("Transform a payload with a user script")
            .input(PortMetadata::action(Self::PORT_ACTION, "Action"))
            .control(Self::CONTROL_NAME, ControlKind::Name)
            .control(Self::CONTROL_SRC, ControlKind::Script)
            .input(PortMetadata::input(Self::PORT_PAYLOAD, "Input", SocketType::Json))
            .output(PortMetadata::output(Self::PORT_PAYLOAD, "Output", SocketType::Json))
    }
}
