//! Fluent builder for flow graphs
//!
//! Provides a compact way to assemble graphs in code, checking every node
//! and wire exactly as the editor would.

use serde_json::Value;

use crate::controls::ControlChange;
use crate::error::Result;
use crate::graph::FlowGraph;
use crate::registry::ComponentRegistry;
use crate::sockets::SocketRegistry;
use crate::types::{NodeId, Wire};

/// Fluent builder for constructing flows
///
/// # Example
///
/// ```ignore
/// let graph = FlowBuilder::new(&components, &sockets)
///     .add_node("Input", (0.0, 0.0))
///     .add_node("Output", (300.0, 0.0))
///     .connect(1, "payload", 2, "payload")
///     .build()?;
/// ```
pub struct FlowBuilder<'a> {
    components: &'a ComponentRegistry,
    sockets: &'a SocketRegistry,
    graph: FlowGraph,
    last_node: Option<NodeId>,
    error: Option<crate::error::FlowGraphError>,
}

impl<'a> FlowBuilder<'a> {
    pub fn new(components: &'a ComponentRegistry, sockets: &'a SocketRegistry) -> Self {
        Self {
            components,
            sockets,
            graph: FlowGraph::default(),
            last_node: None,
            error: None,
        }
    }

    /// Add a node of the named component
    pub fn add_node(mut self, component: &str, position: (f64, f64)) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.components.require(component) {
            Ok(metadata) => self.last_node = Some(self.graph.add_node(metadata, position)),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Set a control value on the most recently added node
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Some(node) = self.last_node {
            if let Err(e) = self.graph.set_control_value(ControlChange::new(node, key, value)) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Wire an output port to an input port
    pub fn connect(mut self, from: NodeId, output: &str, to: NodeId, input: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(e) = self.graph.connect(Wire::new(from, output, to, input), self.sockets) {
            self.error = Some(e);
        }
        self
    }

    /// Id of the most recently added node
    pub fn last_node(&self) -> Option<NodeId> {
        self.last_node
    }

    /// Finish, returning the first error hit along the way
    pub fn build(self) -> Result<FlowGraph> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlKind;
    use crate::descriptor::{ComponentCategory, ComponentMetadata, PortMetadata};
    use crate::error::FlowGraphError;
    use crate::sockets::SocketType;
    use serde_json::json;

    fn components() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register(
            ComponentMetadata::new("Number", ComponentCategory::Value)
                .control("num", ControlKind::Number)
                .output(PortMetadata::output("num", "Number", SocketType::Number)),
        );
        registry.register(
            ComponentMetadata::new("Add", ComponentCategory::Processing)
                .input(PortMetadata::input("num", "Number", SocketType::Number))
                .input(PortMetadata::input("num2", "Number2", SocketType::Number))
                .output(PortMetadata::output("num", "Number", SocketType::Number)),
        );
        registry
    }

    #[test]
    fn test_build_flow() {
        let components = components();
        let sockets = SocketRegistry::standard();
        let graph = FlowBuilder::new(&components, &sockets)
            .add_node("Number", (0.0, 0.0))
            .with_value("num", json!(2))
            .add_node("Number", (0.0, 100.0))
            .with_value("num", json!(3))
            .add_node("Add", (200.0, 50.0))
            .connect(1, "num", 3, "num")
            .connect(2, "num", 3, "num2")
            .build()
            .unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.wires().len(), 2);
        assert_eq!(graph.get_dependencies(3), vec![1, 2]);
        assert_eq!(graph.node(2).unwrap().value("num"), Some(&json!(3)));
    }

    #[test]
    fn test_first_error_wins() {
        let components = components();
        let sockets = SocketRegistry::standard();
        let err = FlowBuilder::new(&components, &sockets)
            .add_node("Number", (0.0, 0.0))
            .connect(1, "num", 9, "num")
            .add_node("Missing", (0.0, 0.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, FlowGraphError::UnknownNode(9)));
    }
}
