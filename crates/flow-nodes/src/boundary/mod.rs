//! Boundary nodes
//!
//! The flow's externally supplied payload and its externally visible result.

mod flow_input;
mod flow_output;

pub use flow_input::FlowInput;
pub use flow_output::FlowOutput;
