//! Stored form of a flow graph
//!
//! The store keeps flows in the node editor's JSON layout: nodes keyed by
//! id, each listing its connections on both the input and the output side.
//!
//! ```json
//! {
//!   "id": "flows@1.0.0",
//!   "nodes": {
//!     "1": {
//!       "id": 1, "name": "Input", "data": {}, "position": [0, 0],
//!       "inputs": {},
//!       "outputs": { "payload": { "connections": [ { "node": 2, "input": "payload", "data": {} } ] } }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FlowGraphError, Result};
use crate::graph::FlowGraph;
use crate::registry::ComponentRegistry;
use crate::sockets::SocketRegistry;
use crate::types::{NodeId, Wire};

/// A whole flow as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Editor id (`flows@1.0.0`)
    pub id: String,
    /// Nodes keyed by id
    #[serde(default)]
    pub nodes: BTreeMap<NodeId, DocumentNode>,
}

/// One persisted node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: NodeId,
    /// Component name
    pub name: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub inputs: BTreeMap<String, DocumentInput>,
    #[serde(default)]
    pub outputs: BTreeMap<String, DocumentOutput>,
    #[serde(default)]
    pub position: [f64; 2],
}

/// Connections arriving at one input port
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub connections: Vec<InputConnection>,
}

/// Connections leaving one output port
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutput {
    #[serde(default)]
    pub connections: Vec<OutputConnection>,
}

/// Input-side view of a wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConnection {
    /// Source node
    pub node: NodeId,
    /// Source output port
    pub output: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Output-side view of a wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConnection {
    /// Target node
    pub node: NodeId,
    /// Target input port
    pub input: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl FlowDocument {
    /// Serialize a graph into its stored form
    pub fn from_graph(graph: &FlowGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| {
                let inputs = node
                    .inputs()
                    .iter()
                    .map(|port| {
                        let connections = graph
                            .incoming(node.id, &port.id)
                            .map(|w| InputConnection {
                                node: w.from,
                                output: w.output.clone(),
                                data: Map::new(),
                            })
                            .collect();
                        (port.id.clone(), DocumentInput { connections })
                    })
                    .collect();
                let outputs = node
                    .outputs()
                    .iter()
                    .map(|port| {
                        let connections = graph
                            .outgoing(node.id, &port.id)
                            .map(|w| OutputConnection {
                                node: w.to,
                                input: w.input.clone(),
                                data: Map::new(),
                            })
                            .collect();
                        (port.id.clone(), DocumentOutput { connections })
                    })
                    .collect();
                let document_node = DocumentNode {
                    id: node.id,
                    name: node.name().to_string(),
                    data: node.data().clone(),
                    inputs,
                    outputs,
                    position: [node.position.0, node.position.1],
                };
                (node.id, document_node)
            })
            .collect();

        Self {
            id: graph.id().to_string(),
            nodes,
        }
    }

    /// Parse a stored JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert to a JSON value for transport
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Wires as recorded on the output side, in node and port order
    pub fn wires(&self) -> Vec<Wire> {
        self.nodes
            .values()
            .flat_map(|node| {
                node.outputs.iter().flat_map(move |(port, output)| {
                    output
                        .connections
                        .iter()
                        .map(move |c| Wire::new(node.id, port.clone(), c.node, c.input.clone()))
                })
            })
            .collect()
    }
}

impl FlowGraph {
    /// Rebuild a graph from its stored form
    ///
    /// Ports are rebuilt from the component registry, not trusted from the
    /// document, and every wire is checked as if it were drawn by hand.
    pub fn from_document(
        document: &FlowDocument,
        components: &ComponentRegistry,
        sockets: &SocketRegistry,
    ) -> Result<Self> {
        let mut graph = FlowGraph::new(document.id.clone());

        for (key, node) in &document.nodes {
            if *key != node.id {
                return Err(FlowGraphError::invalid_document(format!(
                    "node keyed {} carries id {}",
                    key, node.id
                )));
            }
            if node.id == 0 || node.id == NodeId::MAX {
                return Err(FlowGraphError::invalid_document(format!(
                    "node id {} is out of range",
                    node.id
                )));
            }
            let component = components.require(&node.name)?;
            graph.insert_node(
                node.id,
                component,
                (node.position[0], node.position[1]),
                node.data.clone(),
            );
        }

        for wire in document.wires() {
            graph.check_connection(&wire, sockets).map_err(|e| {
                FlowGraphError::invalid_document(format!("connection {}: {}", wire, e))
            })?;
            graph.push_wire_unchecked(wire);
        }

        log::debug!(
            "Loaded flow '{}' with {} nodes and {} connections",
            graph.id(),
            graph.len(),
            graph.wires().len()
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{ControlChange, ControlKind};
    use crate::descriptor::{ComponentCategory, ComponentMetadata, PortMetadata};
    use crate::sockets::SocketType;
    use serde_json::json;

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register(
            ComponentMetadata::new("Input", ComponentCategory::Input)
                .output(PortMetadata::output("payload", "REST Payload", SocketType::Json)),
        );
        registry.register(
            ComponentMetadata::new("Output", ComponentCategory::Output)
                .input(PortMetadata::input("payload", "REST Payload", SocketType::Json))
                .input(
                    PortMetadata::input("status", "Status Code", SocketType::Number)
                        .with_control(ControlKind::Number),
                )
                .default_value("status", json!(200)),
        );
        registry
    }

    fn sample_graph() -> FlowGraph {
        let components = registry();
        let sockets = SocketRegistry::standard();
        let mut graph = FlowGraph::default();
        let input = graph.add_node(components.get("Input").unwrap(), (0.0, 0.0));
        let output = graph.add_node(components.get("Output").unwrap(), (300.0, 0.0));
        graph
            .connect(Wire::new(input, "payload", output, "payload"), &sockets)
            .unwrap();
        graph
            .set_control_value(ControlChange::new(output, "status", json!(201)))
            .unwrap();
        graph
    }

    #[test]
    fn test_document_layout() {
        let document = FlowDocument::from_graph(&sample_graph());
        let value = document.to_value().unwrap();
        assert_eq!(value["id"], "flows@1.0.0");
        assert_eq!(value["nodes"]["1"]["name"], "Input");
        assert_eq!(
            value["nodes"]["1"]["outputs"]["payload"]["connections"][0],
            json!({"node": 2, "input": "payload", "data": {}})
        );
        assert_eq!(
            value["nodes"]["2"]["inputs"]["payload"]["connections"][0],
            json!({"node": 1, "output": "payload", "data": {}})
        );
        assert_eq!(value["nodes"]["2"]["inputs"]["status"]["connections"], json!([]));
        assert_eq!(value["nodes"]["2"]["data"]["status"], 201);
        assert_eq!(value["nodes"]["2"]["position"], json!([300.0, 0.0]));
    }

    #[test]
    fn test_reload_equivalent_graph() {
        let graph = sample_graph();
        let value = FlowDocument::from_graph(&graph).to_value().unwrap();
        let document = FlowDocument::from_value(value).unwrap();
        let restored =
            FlowGraph::from_document(&document, &registry(), &SocketRegistry::standard()).unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn test_reload_rejects_unknown_component() {
        let document = FlowDocument::from_value(json!({
            "id": "flows@1.0.0",
            "nodes": {"1": {"id": 1, "name": "Teleport", "data": {}, "position": [0, 0]}}
        }))
        .unwrap();
        let err =
            FlowGraph::from_document(&document, &registry(), &SocketRegistry::standard()).unwrap_err();
        assert!(matches!(err, FlowGraphError::UnknownComponent(name) if name == "Teleport"));
    }

    #[test]
    fn test_reload_rejects_bad_wire() {
        let document = FlowDocument::from_value(json!({
            "id": "flows@1.0.0",
            "nodes": {
                "1": {"id": 1, "name": "Input", "position": [0, 0],
                      "outputs": {"payload": {"connections": [{"node": 2, "input": "status"}]}}},
                "2": {"id": 2, "name": "Output", "position": [100, 0]}
            }
        }))
        .unwrap();
        let err =
            FlowGraph::from_document(&document, &registry(), &SocketRegistry::standard()).unwrap_err();
        assert!(matches!(err, FlowGraphError::InvalidDocument(_)));
    }

    #[test]
    fn test_reload_keeps_ids_and_fills_defaults() {
        let document = FlowDocument::from_value(json!({
            "id": "flows@1.0.0",
            "nodes": {"5": {"id": 5, "name": "Output", "position": [10, 20]}}
        }))
        .unwrap();
        let mut graph =
            FlowGraph::from_document(&document, &registry(), &SocketRegistry::standard()).unwrap();
        assert_eq!(graph.node(5).unwrap().value("status"), Some(&json!(200)));
        let next = graph.add_node(registry().get("Input").unwrap(), (0.0, 0.0));
        assert_eq!(next, 6);
    }

    #[test]
    fn test_reload_rejects_out_of_range_ids() {
        for id in [0, NodeId::MAX] {
            let document = FlowDocument::from_value(json!({
                "id": "flows@1.0.0",
                "nodes": {id.to_string(): {"id": id, "name": "Input"}}
            }))
            .unwrap();
            let err = FlowGraph::from_document(&document, &registry(), &SocketRegistry::standard())
                .unwrap_err();
            assert!(matches!(err, FlowGraphError::InvalidDocument(_)), "id {}", id);
        }
    }
}
