//! Error types for the flow graph

use thiserror::Error;

use crate::sockets::SocketType;
use crate::types::{NodeId, Wire};

/// Result type alias using FlowGraphError
pub type Result<T> = std::result::Result<T, FlowGraphError>;

/// Errors raised while editing or loading a flow graph
#[derive(Debug, Error)]
pub enum FlowGraphError {
    /// Socket name is not one of the known value kinds
    #[error("Unknown socket type: {0}")]
    UnknownSocket(String),

    /// Component name is not registered
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Node id is not part of the graph
    #[error("Node {0} does not exist")]
    UnknownNode(NodeId),

    /// Port name is not declared on the node
    #[error("Node {node} has no {direction} port '{port}'")]
    UnknownPort {
        node: NodeId,
        port: String,
        direction: &'static str,
    },

    /// Output and input sockets are not compatible
    #[error("Cannot connect {output} output to {input} input")]
    IncompatibleSockets { output: SocketType, input: SocketType },

    /// A single-connection input already has a wire
    #[error("Input '{port}' on node {node} accepts only one connection")]
    InputOccupied { node: NodeId, port: String },

    /// The exact same wire already exists
    #[error("Connection {0} already exists")]
    DuplicateWire(Wire),

    /// No such wire in the graph
    #[error("Connection {0} does not exist")]
    UnknownWire(Wire),

    /// Control key is not declared on the node
    #[error("Node {node} has no control '{key}'")]
    UnknownControl { node: NodeId, key: String },

    /// Control is flagged readonly
    #[error("Control '{key}' on node {node} is readonly")]
    ReadOnlyControl { node: NodeId, key: String },

    /// Stored document could not be turned into a graph
    #[error("Invalid flow document: {0}")]
    InvalidDocument(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),
}

impl FlowGraphError {
    /// Create an invalid document error with a message
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Whether this error is a wire-creation rejection the user should see
    pub fn is_connection_rejection(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleSockets { .. } | Self::InputOccupied { .. } | Self::DuplicateWire(_)
        )
    }
}
