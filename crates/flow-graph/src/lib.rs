//! Flow Graph - typed node-graph model for visual data flows
//!
//! This crate holds everything a flow editor needs that does not depend on
//! how flows are stored or executed:
//!
//! - Socket types and their compatibility rules
//! - Component metadata (ports, controls, default data) and a registry
//! - The graph itself, with wires checked at creation time
//! - The stored document form, whole-flow validation and an editor with
//!   compressed snapshot undo/redo
//!
//! # Example
//!
//! ```ignore
//! use flow_graph::{FlowEditor, SocketRegistry, Wire};
//!
//! let mut editor = FlowEditor::new(flow_nodes::builtin_registry(), SocketRegistry::standard())?;
//! let input = editor.add_node("Input", (0.0, 0.0))?;
//! let output = editor.add_node("Output", (300.0, 0.0))?;
//! editor.connect(Wire::new(input, "payload", output, "payload"))?;
//! let stored = editor.to_document().to_value()?;
//! ```

pub mod builder;
pub mod controls;
pub mod descriptor;
pub mod document;
pub mod editor;
pub mod error;
pub mod events;
pub mod graph;
pub mod registry;
pub mod sockets;
pub mod types;
pub mod undo;
pub mod validation;

pub use builder::FlowBuilder;
pub use controls::{ControlChange, ControlKind, ControlSpec};
pub use descriptor::{ComponentCategory, ComponentDescriptor, ComponentMetadata, PortMetadata};
pub use document::FlowDocument;
pub use editor::FlowEditor;
pub use error::{FlowGraphError, Result};
pub use events::{EditorEvent, EventError, EventSink, NullEventSink, VecEventSink};
pub use graph::{FlowGraph, EDITOR_ID};
pub use registry::ComponentRegistry;
pub use sockets::{SocketRegistry, SocketRegistryBuilder, SocketType};
pub use types::{GraphNode, NodeId, Wire};
pub use undo::UndoStack;
pub use validation::{validate_document, validate_flow, ValidationError};
