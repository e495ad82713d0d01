//! The flow graph: node instances and the type-checked wires between them

use std::collections::BTreeMap;

use serde_json::Value;

use crate::controls::ControlChange;
use crate::descriptor::ComponentMetadata;
use crate::error::{FlowGraphError, Result};
use crate::sockets::SocketRegistry;
use crate::types::{GraphNode, NodeId, Wire};

/// Editor id stamped on every stored flow document
pub const EDITOR_ID: &str = "flows@1.0.0";

/// A complete flow: nodes and wires
#[derive(Debug, Clone, PartialEq)]
pub struct FlowGraph {
    id: String,
    nodes: BTreeMap<NodeId, GraphNode>,
    wires: Vec<Wire>,
    next_id: NodeId,
}

impl FlowGraph {
    /// Create an empty graph with the given editor id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: BTreeMap::new(),
            wires: Vec::new(),
            next_id: 1,
        }
    }

    /// Editor id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Place a new node built from a component
    pub fn add_node(&mut self, component: &ComponentMetadata, position: (f64, f64)) -> NodeId {
        let id = self.next_id;
        self.insert_node(id, component, position, serde_json::Map::new());
        id
    }

    /// Place a node with a known id and data (used when loading documents)
    pub(crate) fn insert_node(
        &mut self,
        id: NodeId,
        component: &ComponentMetadata,
        position: (f64, f64),
        data: serde_json::Map<String, Value>,
    ) {
        let mut node = GraphNode::new(id, position);
        node.data = data;
        component.build(&mut node);
        self.nodes.insert(id, node);
        self.next_id = self.next_id.max(id.saturating_add(1));
    }

    /// Remove a node and every wire attached to it
    pub fn remove_node(&mut self, id: NodeId) -> Result<GraphNode> {
        let node = self.nodes.remove(&id).ok_or(FlowGraphError::UnknownNode(id))?;
        self.wires.retain(|w| !w.touches(id));
        Ok(node)
    }

    /// Find a node by ID
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Nodes ordered by id
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// All wires in creation order
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move a node in the editor
    pub fn move_node(&mut self, id: NodeId, position: (f64, f64)) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(FlowGraphError::UnknownNode(id))?;
        node.position = position;
        Ok(())
    }

    /// Wires ending at a node's input port
    pub fn incoming<'a>(&'a self, node: NodeId, input: &'a str) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.iter().filter(move |w| w.to == node && w.input == input)
    }

    /// Wires leaving a node's output port
    pub fn outgoing<'a>(&'a self, node: NodeId, output: &'a str) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires.iter().filter(move |w| w.from == node && w.output == output)
    }

    /// Get the IDs of nodes that this node depends on (upstream nodes)
    pub fn get_dependencies(&self, node: NodeId) -> Vec<NodeId> {
        self.wires.iter().filter(|w| w.to == node).map(|w| w.from).collect()
    }

    /// Get the IDs of nodes that depend on this node (downstream nodes)
    pub fn get_dependents(&self, node: NodeId) -> Vec<NodeId> {
        self.wires.iter().filter(|w| w.from == node).map(|w| w.to).collect()
    }

    /// Check whether a wire could be added without adding it
    pub fn check_connection(&self, wire: &Wire, sockets: &SocketRegistry) -> Result<()> {
        let source = self.node(wire.from).ok_or(FlowGraphError::UnknownNode(wire.from))?;
        let target = self.node(wire.to).ok_or(FlowGraphError::UnknownNode(wire.to))?;
        let output = source.output(&wire.output).ok_or_else(|| FlowGraphError::UnknownPort {
            node: wire.from,
            port: wire.output.clone(),
            direction: "output",
        })?;
        let input = target.input(&wire.input).ok_or_else(|| FlowGraphError::UnknownPort {
            node: wire.to,
            port: wire.input.clone(),
            direction: "input",
        })?;

        if !sockets.is_compatible(output.socket, input.socket) {
            return Err(FlowGraphError::IncompatibleSockets {
                output: output.socket,
                input: input.socket,
            });
        }
        if self.wires.contains(wire) {
            return Err(FlowGraphError::DuplicateWire(wire.clone()));
        }
        if !input.multiple && self.incoming(wire.to, &wire.input).next().is_some() {
            return Err(FlowGraphError::InputOccupied {
                node: wire.to,
                port: wire.input.clone(),
            });
        }
        Ok(())
    }

    /// Wire an output port to an input port
    ///
    /// Rejected at creation time when the ports are unknown, the sockets are
    /// incompatible, the wire exists already, or a single-connection input
    /// is already connected.
    pub fn connect(&mut self, wire: Wire, sockets: &SocketRegistry) -> Result<()> {
        self.check_connection(&wire, sockets)?;
        log::debug!("Connected {}", wire);
        self.wires.push(wire);
        Ok(())
    }

    /// Remove a wire
    pub fn disconnect(&mut self, wire: &Wire) -> Result<()> {
        let pos = self
            .wires
            .iter()
            .position(|w| w == wire)
            .ok_or_else(|| FlowGraphError::UnknownWire(wire.clone()))?;
        self.wires.remove(pos);
        Ok(())
    }

    /// Push a control edit into the owning node's data map
    ///
    /// Returns the previous value, if any.
    pub fn set_control_value(&mut self, change: ControlChange) -> Result<Option<Value>> {
        let node = self
            .nodes
            .get_mut(&change.node)
            .ok_or(FlowGraphError::UnknownNode(change.node))?;
        let control = node.control(&change.key).ok_or_else(|| FlowGraphError::UnknownControl {
            node: change.node,
            key: change.key.clone(),
        })?;
        if control.readonly {
            return Err(FlowGraphError::ReadOnlyControl {
                node: change.node,
                key: change.key,
            });
        }
        Ok(node.data.insert(change.key, change.value))
    }

    /// Append a wire without checks (used by the document loader)
    pub(crate) fn push_wire_unchecked(&mut self, wire: Wire) {
        self.wires.push(wire);
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new(EDITOR_ID)
    }
}
