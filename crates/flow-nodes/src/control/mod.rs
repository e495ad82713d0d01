//! Control-flow nodes
//!
//! Nodes triggered through a single-connection Action input.

mod condition;
mod script;

pub use condition::Condition;
pub use script::Script;
