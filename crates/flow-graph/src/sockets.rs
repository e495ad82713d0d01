//! Socket types and their compatibility relation
//!
//! A socket is the value kind carried by a port. Two ports may be wired
//! together when their sockets are the same or when the pair has been
//! combined in the registry. The registry is assembled once through
//! [`SocketRegistryBuilder`] and is immutable afterwards.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlowGraphError, Result};

/// The value kind carried by a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocketType {
    /// Integer number
    Number,
    /// Floating point number
    Float,
    /// Text string
    String,
    /// Boolean value
    Bool,
    /// Control-flow trigger
    Action,
    /// JSON document
    Json,
    /// Template source
    Template,
    /// Script source
    Script,
    /// Universal data socket
    #[serde(rename = "ANY")]
    Any,
}

impl SocketType {
    /// Every socket type, in declaration order
    pub const ALL: [SocketType; 9] = [
        SocketType::Number,
        SocketType::Float,
        SocketType::String,
        SocketType::Bool,
        SocketType::Action,
        SocketType::Json,
        SocketType::Template,
        SocketType::Script,
        SocketType::Any,
    ];

    /// Data sockets that the universal socket accepts
    pub const ANY_COMPATIBLE: [SocketType; 5] = [
        SocketType::Number,
        SocketType::String,
        SocketType::Bool,
        SocketType::Json,
        SocketType::Float,
    ];

    /// Name used by the node editor for this socket
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Float => "Float",
            Self::String => "String",
            Self::Bool => "Bool",
            Self::Action => "Action",
            Self::Json => "Json",
            Self::Template => "Template",
            Self::Script => "Script",
            Self::Any => "ANY",
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SocketType {
    type Err = FlowGraphError;

    fn from_str(s: &str) -> Result<Self> {
        SocketType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| FlowGraphError::UnknownSocket(s.to_string()))
    }
}

/// Mutable stage of the socket registry
///
/// # Example
///
/// ```ignore
/// let mut builder = SocketRegistryBuilder::new();
/// let num = builder.declare("Number")?;
/// let any = builder.declare("ANY")?;
/// builder.combine(num, any);
/// let sockets = builder.build();
/// assert!(sockets.is_compatible(SocketType::Any, SocketType::Number));
/// ```
#[derive(Debug, Default)]
pub struct SocketRegistryBuilder {
    declared: BTreeSet<SocketType>,
    combined: HashSet<(SocketType, SocketType)>,
}

impl SocketRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a socket by its editor name
    pub fn declare(&mut self, name: &str) -> Result<SocketType> {
        let socket: SocketType = name.parse()?;
        self.declared.insert(socket);
        Ok(socket)
    }

    /// Mark two sockets as mutually compatible
    ///
    /// Idempotent and symmetric. Undeclared sockets are declared implicitly.
    pub fn combine(&mut self, a: SocketType, b: SocketType) -> &mut Self {
        self.declared.insert(a);
        self.declared.insert(b);
        self.combined.insert((a, b));
        self.combined.insert((b, a));
        self
    }

    /// Freeze the registry
    pub fn build(self) -> SocketRegistry {
        SocketRegistry {
            declared: self.declared,
            combined: self.combined,
        }
    }
}

/// Read-only socket compatibility relation
#[derive(Debug, Clone)]
pub struct SocketRegistry {
    declared: BTreeSet<SocketType>,
    combined: HashSet<(SocketType, SocketType)>,
}

impl SocketRegistry {
    /// Registry used by every flow: all sockets declared, `ANY` combined
    /// with the plain data sockets
    pub fn standard() -> Self {
        let mut builder = SocketRegistryBuilder::new();
        for socket in SocketType::ALL {
            builder.declared.insert(socket);
        }
        for socket in SocketType::ANY_COMPATIBLE {
            builder.combine(socket, SocketType::Any);
        }
        builder.build()
    }

    /// Whether an output of type `a` may be wired into an input of type `b`
    pub fn is_compatible(&self, a: SocketType, b: SocketType) -> bool {
        a == b || self.combined.contains(&(a, b))
    }

    /// Whether the socket was declared
    pub fn is_declared(&self, socket: SocketType) -> bool {
        self.declared.contains(&socket)
    }

    /// Declared sockets, in `SocketType` order
    pub fn declared(&self) -> impl Iterator<Item = SocketType> + '_ {
        self.declared.iter().copied()
    }
}

impl Default for SocketRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
