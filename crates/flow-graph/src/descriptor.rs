//! Component descriptor trait and metadata types
//!
//! A component describes one kind of node: its fixed input and output
//! ports, the controls it embeds and the data defaults it seeds. The
//! metadata is the single source of truth for building nodes, checking
//! wires and rendering the palette.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::controls::{ControlKind, ControlSpec};
use crate::sockets::SocketType;
use crate::types::GraphNode;

/// Trait for component types that can describe their metadata
///
/// # Example
///
/// ```ignore
/// impl ComponentDescriptor for ArrayCount {
///     fn descriptor() -> ComponentMetadata {
///         ComponentMetadata::new("Array Count", ComponentCategory::Processing)
///             .input(PortMetadata::input("payload", "JSON Payload", SocketType::Json))
///             .output(PortMetadata::output("num", "Count", SocketType::Number))
///     }
/// }
/// ```
pub trait ComponentDescriptor {
    /// Get the static metadata for this component
    fn descriptor() -> ComponentMetadata
    where
        Self: Sized;
}

/// Palette grouping of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    /// Flow entry point
    Input,
    /// Flow result
    Output,
    /// Constant values edited in place
    Value,
    /// Pure data transforms
    Processing,
    /// Database access
    Storage,
    /// Branching and scripting
    Control,
}

/// Metadata for a port (input or output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMetadata {
    /// Port name, unique within its direction on the node
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Value kind
    pub socket: SocketType,
    /// Whether several wires may end at this input
    pub multiple: bool,
    /// Editor shown on the port while it is not connected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlSpec>,
}

impl PortMetadata {
    /// Create a data input that accepts any number of wires
    pub fn input(id: impl Into<String>, label: impl Into<String>, socket: SocketType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            socket,
            multiple: true,
            control: None,
        }
    }

    /// Create the single-connection control-flow input
    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::input(id, label, SocketType::Action).single()
    }

    /// Create an output port
    pub fn output(id: impl Into<String>, label: impl Into<String>, socket: SocketType) -> Self {
        Self::input(id, label, socket)
    }

    /// Restrict this input to one incoming wire
    pub fn single(mut self) -> Self {
        self.multiple = false;
        self
    }

    /// Host an editor on this port, keyed by the port name
    pub fn with_control(mut self, kind: ControlKind) -> Self {
        self.control = Some(ControlSpec::new(self.id.clone(), kind));
        self
    }
}

/// Complete metadata for a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    /// Unique component name as stored in flow documents (e.g. "Array Sum")
    pub name: String,
    /// Palette category
    pub category: ComponentCategory,
    /// What the component does
    pub description: String,
    /// Input port definitions
    pub inputs: Vec<PortMetadata>,
    /// Output port definitions
    pub outputs: Vec<PortMetadata>,
    /// Controls on the node body
    pub controls: Vec<ControlSpec>,
    /// Data seeded into new nodes
    #[serde(default)]
    pub default_data: Map<String, Value>,
}

impl ComponentMetadata {
    /// Create metadata with no ports
    pub fn new(name: impl Into<String>, category: ComponentCategory) -> Self {
        Self {
            name: name.into(),
            category,
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            controls: Vec::new(),
            default_data: Map::new(),
        }
    }

    /// Set the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an input port
    pub fn input(mut self, port: PortMetadata) -> Self {
        self.inputs.push(port);
        self
    }

    /// Append an output port
    pub fn output(mut self, port: PortMetadata) -> Self {
        self.outputs.push(port);
        self
    }

    /// Append a body control
    pub fn control(mut self, key: impl Into<String>, kind: ControlKind) -> Self {
        self.controls.push(ControlSpec::new(key, kind));
        self
    }

    /// Seed a data default
    pub fn default_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.default_data.insert(key.into(), value);
        self
    }

    /// Find an input port
    pub fn find_input(&self, id: &str) -> Option<&PortMetadata> {
        self.inputs.iter().find(|p| p.id == id)
    }

    /// Find an output port
    pub fn find_output(&self, id: &str) -> Option<&PortMetadata> {
        self.outputs.iter().find(|p| p.id == id)
    }

    /// Body controls followed by port-hosted controls
    pub fn all_controls(&self) -> impl Iterator<Item = &ControlSpec> {
        self.controls
            .iter()
            .chain(self.inputs.iter().filter_map(|p| p.control.as_ref()))
    }

    /// Attach this component's ports and controls to a node
    ///
    /// Purely structural and idempotent: the port and control sets are
    /// replaced by the component's, and defaults only fill keys the node
    /// does not hold yet.
    pub fn build(&self, node: &mut GraphNode) {
        node.name = self.name.clone();
        node.inputs = self.inputs.clone();
        node.outputs = self.outputs.clone();
        node.controls = self.all_controls().cloned().collect();
        for (key, value) in &self.default_data {
            node.data.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}
