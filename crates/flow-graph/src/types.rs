//! Core types for flow graphs
//!
//! These types define the node instances and wires of a flow. A node's
//! port and control sets come from its component and cannot be changed
//! from outside the crate; only its data values and position move.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::controls::ControlSpec;
use crate::descriptor::PortMetadata;

/// Unique identifier for a node, assigned sequentially from 1
pub type NodeId = u64;

/// A node instance in a graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Unique identifier for this node instance
    pub id: NodeId,
    /// Component name
    pub(crate) name: String,
    /// Control values and component defaults
    pub(crate) data: Map<String, Value>,
    pub(crate) inputs: Vec<PortMetadata>,
    pub(crate) outputs: Vec<PortMetadata>,
    pub(crate) controls: Vec<ControlSpec>,
    /// Position in the editor (x, y)
    pub position: (f64, f64),
}

impl GraphNode {
    /// Create a bare node; ports are attached by `ComponentMetadata::build`
    pub(crate) fn new(id: NodeId, position: (f64, f64)) -> Self {
        Self {
            id,
            name: String::new(),
            data: Map::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            controls: Vec::new(),
            position,
        }
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's data map
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// A single data value
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Input ports
    pub fn inputs(&self) -> &[PortMetadata] {
        &self.inputs
    }

    /// Output ports
    pub fn outputs(&self) -> &[PortMetadata] {
        &self.outputs
    }

    /// Every control on the node, body controls first
    pub fn controls(&self) -> &[ControlSpec] {
        &self.controls
    }

    /// Find an input port
    pub fn input(&self, id: &str) -> Option<&PortMetadata> {
        self.inputs.iter().find(|p| p.id == id)
    }

    /// Find an output port
    pub fn output(&self, id: &str) -> Option<&PortMetadata> {
        self.outputs.iter().find(|p| p.id == id)
    }

    /// Find a control
    pub fn control(&self, key: &str) -> Option<&ControlSpec> {
        self.controls.iter().find(|c| c.key == key)
    }
}

/// A directed connection from an output port to an input port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    /// Source node
    pub from: NodeId,
    /// Source output port
    pub output: String,
    /// Target node
    pub to: NodeId,
    /// Target input port
    pub input: String,
}

impl Wire {
    pub fn new(from: NodeId, output: impl Into<String>, to: NodeId, input: impl Into<String>) -> Self {
        Self {
            from,
            output: output.into(),
            to,
            input: input.into(),
        }
    }

    /// Whether the wire touches the node on either end
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}

impl std::fmt::Display for Wire {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} -> {}.{}", self.from, self.output, self.to, self.input)
    }
}
