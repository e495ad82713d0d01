//! Numeric constants

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};

/// Integer constant
pub struct NumberValue;

impl NumberValue {
    pub const NAME: &'static str = "Number";
    /// Port ID (and control key) for the value
    pub const PORT_NUM: &'static str = "num";
}

impl ComponentDescriptor for NumberValue {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Value)
            .describe("Integer constant")
            .control(Self::PORT_NUM, ControlKind::Number)
            .output(PortMetadata::output(Self::PORT_NUM, "Number", SocketType::Number))
    }
}

/// Floating point constant
pub struct FloatValue;

impl FloatValue {
    pub const NAME: &'static str = "Float";
    /// Port ID (and control key) for the value
    pub const PORT_FLOAT: &'static str = "float";
}

impl ComponentDescriptor for FloatValue {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Value)
            .describe("Floating point constant")
            .control(Self::PORT_FLOAT, ControlKind::Float)
            .output(PortMetadata::output(Self::PORT_FLOAT, "Float", SocketType::Float))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_key_matches_output() {
        for meta in [NumberValue::descriptor(), FloatValue::descriptor()] {
            assert_eq!(meta.controls.len(), 1);
            assert_eq!(meta.controls[0].key, meta.outputs[0].id);
            assert!(meta.inputs.is_empty());
        }
    }
}
