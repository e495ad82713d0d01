//! Condition node
//!
//! A binary branch: when triggered, compares `left` and `right` with the
//! condition expression and fires exactly one of its `true`/`false` action
//! outputs.

use flow_graph::{
    ComponentCategory, ComponentDescriptor, ComponentMetadata, ControlKind, PortMetadata, SocketType,
};

pub struct Condition;

impl Condition {
    pub const NAME: &'static str = "Condition";
    pub const PORT_ACTION: &'static str = "action";
    pub const PORT_LEFT: &'static str = "left";
    pub const PORT_RIGHT: &'static str = "right";
    pub const PORT_TRUE: &'static str = "true";
    pub const PORT_FALSE: &'static str = "false";
    /// Control key for the condition expression
    pub const CONTROL_CONDITION: &'static str = "condition";
}

impl ComponentDescriptor for Condition {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Control)
            .describe("Branch on a condition")
            .input(PortMetadata::action(Self::PORT_ACTION, "Action"))
            .control(Self::CONTROL_CONDITION, ControlKind::Condition)
            .input(PortMetadata::input(Self::PORT_LEFT, "left", SocketType::Any))
            .input(PortMetadata::input(Self::PORT_RIGHT, "right", SocketType::Any))
            .output(PortMetadata::output(Self::PORT_TRUE, "True", SocketType::Action))
            .output(PortMetadata::output(Self::PORT_FALSE, "False", SocketType::Action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_outputs_are_actions() {
        let meta = Condition::descriptor();
        assert!(meta.outputs.iter().all(|p| p.socket == SocketType::Action));
        assert_eq!(meta.outputs.len(), 2);
        assert!(!meta.find_input(Condition::PORT_ACTION).unwrap().multiple);
        assert_eq!(meta.controls[0].kind, ControlKind::Condition);
    }
}
