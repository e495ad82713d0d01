//! Whole-flow validation
//!
//! `validate_document` checks an untrusted stored document and reports
//! every problem at once instead of stopping at the first bad wire.
//! `validate_flow` runs the same checks on a built graph, which adds the
//! structural rules single wire checks cannot see: cycles and the boundary
//! nodes.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::document::FlowDocument;
use crate::graph::FlowGraph;
use crate::registry::ComponentRegistry;
use crate::sockets::{SocketRegistry, SocketType};
use crate::types::{NodeId, Wire};

/// Component name of the flow entry node
pub const INPUT_COMPONENT: &str = "Input";
/// Component name of the flow result node
pub const OUTPUT_COMPONENT: &str = "Output";

/// Validation error with location context
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Cycle detected in the graph
    CycleDetected,
    /// A node names a component that is not registered
    UnknownComponent { node_id: NodeId, name: String },
    /// A wire references a node that does not exist
    UnknownNode { wire: Wire, node_id: NodeId },
    /// A wire references a port the component does not declare
    UnknownPort { wire: Wire, node_id: NodeId, port: String },
    /// A wire connects incompatible sockets
    IncompatibleSockets {
        wire: Wire,
        output: SocketType,
        input: SocketType,
    },
    /// A single-connection input has more than one wire
    InputOverflow { node_id: NodeId, port: String, count: usize },
    /// The input and output sides of the document disagree about a wire
    OneSidedConnection { wire: Wire },
    /// The flow has no Output node to produce its result
    MissingOutputNode,
    /// The flow has more than one Input node
    MultipleInputNodes { node_ids: Vec<NodeId> },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycleDetected => write!(f, "Cycle detected in flow"),
            Self::UnknownComponent { node_id, name } => {
                write!(f, "Unknown component '{}' for node {}", name, node_id)
            }
            Self::UnknownNode { wire, node_id } => {
                write!(f, "Connection {} references unknown node {}", wire, node_id)
            }
            Self::UnknownPort { wire, node_id, port } => {
                write!(
                    f,
                    "Connection {} references unknown port '{}' on node {}",
                    wire, port, node_id
                )
            }
            Self::IncompatibleSockets { wire, output, input } => {
                write!(
                    f,
                    "Connection {} connects incompatible types: {} -> {}",
                    wire, output, input
                )
            }
            Self::InputOverflow { node_id, port, count } => {
                write!(
                    f,
                    "Input '{}' on node {} accepts one connection but has {}",
                    port, node_id, count
                )
            }
            Self::OneSidedConnection { wire } => {
                write!(f, "Connection {} is only recorded on one side", wire)
            }
            Self::MissingOutputNode => write!(f, "Flow has no Output node"),
            Self::MultipleInputNodes { node_ids } => {
                write!(f, "Flow has multiple Input nodes: {:?}", node_ids)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a stored document against the registries
///
/// Returns all validation errors found (not just the first).
pub fn validate_document(
    document: &FlowDocument,
    components: &ComponentRegistry,
    sockets: &SocketRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for node in document.nodes.values() {
        if !components.has_component(&node.name) {
            errors.push(ValidationError::UnknownComponent {
                node_id: node.id,
                name: node.name.clone(),
            });
        }
    }

    let wires = document.wires();
    validate_wire_sides(document, &wires, &mut errors);
    validate_wires(document, &wires, components, sockets, &mut errors);

    let edges: Vec<(NodeId, NodeId)> = wires.iter().map(|w| (w.from, w.to)).collect();
    detect_cycles(document.nodes.keys().copied(), &edges, &mut errors);

    let names: Vec<(NodeId, &str)> = document
        .nodes
        .values()
        .map(|n| (n.id, n.name.as_str()))
        .collect();
    validate_boundaries(&names, &mut errors);

    errors
}

/// Validate a built graph against the registries
///
/// Runs the document checks on the graph's stored form, so a graph built
/// against one registry can be checked against another.
pub fn validate_flow(
    graph: &FlowGraph,
    components: &ComponentRegistry,
    sockets: &SocketRegistry,
) -> Vec<ValidationError> {
    validate_document(&FlowDocument::from_graph(graph), components, sockets)
}

/// Check that every output-side connection has its input-side twin and back
fn validate_wire_sides(document: &FlowDocument, wires: &[Wire], errors: &mut Vec<ValidationError>) {
    for wire in wires {
        let mirrored = document
            .nodes
            .get(&wire.to)
            .and_then(|n| n.inputs.get(&wire.input))
            .map(|input| {
                input
                    .connections
                    .iter()
                    .any(|c| c.node == wire.from && c.output == wire.output)
            })
            .unwrap_or(false);
        if !mirrored && document.nodes.contains_key(&wire.to) {
            errors.push(ValidationError::OneSidedConnection { wire: wire.clone() });
        }
    }

    for node in document.nodes.values() {
        for (port, input) in &node.inputs {
            for c in &input.connections {
                let wire = Wire::new(c.node, c.output.clone(), node.id, port.clone());
                if document.nodes.contains_key(&c.node) && !wires.contains(&wire) {
                    errors.push(ValidationError::OneSidedConnection { wire });
                }
            }
        }
    }
}

/// Check node and port references, socket compatibility and input fan-in
fn validate_wires(
    document: &FlowDocument,
    wires: &[Wire],
    components: &ComponentRegistry,
    sockets: &SocketRegistry,
    errors: &mut Vec<ValidationError>,
) {
    let mut fan_in: BTreeMap<(NodeId, &str), usize> = BTreeMap::new();

    for wire in wires {
        let Some(target) = document.nodes.get(&wire.to) else {
            errors.push(ValidationError::UnknownNode {
                wire: wire.clone(),
                node_id: wire.to,
            });
            continue;
        };
        let source_component = document
            .nodes
            .get(&wire.from)
            .and_then(|n| components.get(&n.name));

        let output = source_component.and_then(|c| c.find_output(&wire.output));
        let input = components
            .get(&target.name)
            .and_then(|c| c.find_input(&wire.input));

        if source_component.is_some() && output.is_none() {
            errors.push(ValidationError::UnknownPort {
                wire: wire.clone(),
                node_id: wire.from,
                port: wire.output.clone(),
            });
        }
        if input.is_none() && components.has_component(&target.name) {
            errors.push(ValidationError::UnknownPort {
                wire: wire.clone(),
                node_id: wire.to,
                port: wire.input.clone(),
            });
        }

        if let (Some(output), Some(input)) = (output, input) {
            if !sockets.is_compatible(output.socket, input.socket) {
                errors.push(ValidationError::IncompatibleSockets {
                    wire: wire.clone(),
                    output: output.socket,
                    input: input.socket,
                });
            }
            if !input.multiple {
                *fan_in.entry((wire.to, input.id.as_str())).or_insert(0) += 1;
            }
        }
    }

    for ((node_id, port), count) in fan_in {
        if count > 1 {
            errors.push(ValidationError::InputOverflow {
                node_id,
                port: port.to_string(),
                count,
            });
        }
    }
}

/// Detect cycles using Kahn's algorithm (topological sort)
fn detect_cycles(
    nodes: impl Iterator<Item = NodeId>,
    edges: &[(NodeId, NodeId)],
    errors: &mut Vec<ValidationError>,
) {
    let mut in_degree: HashMap<NodeId, usize> = nodes.map(|id| (id, 0)).collect();
    let node_count = in_degree.len();
    for (_, target) in edges {
        if let Some(deg) = in_degree.get_mut(target) {
            *deg += 1;
        }
    }

    let mut queue: VecDeque<NodeId> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut visited = 0;
    while let Some(node_id) = queue.pop_front() {
        visited += 1;
        for (source, target) in edges {
            if *source == node_id {
                if let Some(deg) = in_degree.get_mut(target) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(*target);
                    }
                }
            }
        }
    }

    if visited < node_count {
        errors.push(ValidationError::CycleDetected);
    }
}

/// Check the Input/Output boundary nodes
fn validate_boundaries(nodes: &[(NodeId, &str)], errors: &mut Vec<ValidationError>) {
    let inputs: Vec<NodeId> = nodes
        .iter()
        .filter(|(_, name)| *name == INPUT_COMPONENT)
        .map(|(id, _)| *id)
        .collect();
    if inputs.len() > 1 {
        errors.push(ValidationError::MultipleInputNodes { node_ids: inputs });
    }
    if !nodes.iter().any(|(_, name)| *name == OUTPUT_COMPONENT) {
        errors.push(ValidationError::MissingOutputNode);
    }
}
