//! Arithmetic on two numbers

use flow_graph::{ComponentCategory, ComponentDescriptor, ComponentMetadata, PortMetadata, SocketType};

/// Port ID for the first operand and the result
pub const PORT_NUM: &str = "num";
/// Port ID for the second operand
pub const PORT_NUM2: &str = "num2";

fn binary(name: &str, description: &str) -> ComponentMetadata {
    ComponentMetadata::new(name, ComponentCategory::Processing)
        .describe(description)
        .input(PortMetadata::input(PORT_NUM, "Number", SocketType::Number))
        .input(PortMetadata::input(PORT_NUM2, "Number2", SocketType::Number))
        .output(PortMetadata::output(PORT_NUM, "Number", SocketType::Number))
}

pub struct Add;

impl Add {
    pub const NAME: &'static str = "Add";
}

impl ComponentDescriptor for Add {
    fn descriptor() -> ComponentMetadata {
        binary(Self::NAME, "Sum of two numbers")
    }
}

pub struct Multiply;

impl Multiply {
    pub const NAME: &'static str = "Multiply";
}

impl ComponentDescriptor for Multiply {
    fn descriptor() -> ComponentMetadata {
        binary(Self::NAME, "Product of two numbers")
    }
}
