//! Editable values bound to a node or to one of its input ports

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// Widget kind used to edit a control value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Free text
    Text,
    /// Short identifier (field names, keys)
    Name,
    /// Integer
    Number,
    /// Floating point number
    Float,
    /// JSON blob
    Json,
    /// Script source code
    Script,
    /// Boolean condition expression
    Condition,
    /// Template string
    Template,
}

/// Declaration of a control on a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSpec {
    /// Key in the owning node's data map, unique within the node
    pub key: String,
    /// Widget kind
    pub kind: ControlKind,
    /// Suppresses edits
    #[serde(default)]
    pub readonly: bool,
}

impl ControlSpec {
    /// Create an editable control
    pub fn new(key: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            key: key.into(),
            kind,
            readonly: false,
        }
    }

    /// Mark this control readonly
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// A value edit pushed from a widget into the owning node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChange {
    /// Node that owns the control
    pub node: NodeId,
    /// Control key
    pub key: String,
    /// New value
    pub value: serde_json::Value,
}

impl ControlChange {
    pub fn new(node: NodeId, key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            node,
            key: key.into(),
            value,
        }
    }
}
