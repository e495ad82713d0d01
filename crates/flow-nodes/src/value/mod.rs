//! Value nodes
//!
//! Constants typed into a control on the node body and exposed on a
//! single output.

mod number;
mod text;

pub use number::{FloatValue, NumberValue};
pub use text::{JsonValue, TemplateValue, TextValue};
