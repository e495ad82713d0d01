//! Interactive flow editor
//!
//! `FlowEditor` ties a graph to the registries it is checked against, an
//! event sink and the undo history. Every successful edit records a
//! snapshot; rejected edits leave graph, history and snapshot untouched.

use serde_json::Value;

use crate::controls::ControlChange;
use crate::document::FlowDocument;
use crate::error::Result;
use crate::events::{EditorEvent, EventSink, NullEventSink};
use crate::graph::FlowGraph;
use crate::registry::ComponentRegistry;
use crate::sockets::SocketRegistry;
use crate::types::{NodeId, Wire};
use crate::undo::UndoStack;

/// Snapshots kept by default
pub const DEFAULT_HISTORY: usize = 100;

pub struct FlowEditor {
    sockets: SocketRegistry,
    components: ComponentRegistry,
    graph: FlowGraph,
    events: Box<dyn EventSink>,
    history: UndoStack,
}

impl FlowEditor {
    /// Create an editor over an empty flow
    pub fn new(components: ComponentRegistry, sockets: SocketRegistry) -> Result<Self> {
        let mut editor = Self {
            sockets,
            components,
            graph: FlowGraph::default(),
            events: Box::new(NullEventSink),
            history: UndoStack::new(DEFAULT_HISTORY),
        };
        editor.snapshot()?;
        Ok(editor)
    }

    /// Replace the event sink
    pub fn with_event_sink(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    /// Limit the undo history; drops any history recorded so far
    pub fn with_history(mut self, max_snapshots: usize) -> Result<Self> {
        self.history = UndoStack::new(max_snapshots);
        self.snapshot()?;
        Ok(self)
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn sockets(&self) -> &SocketRegistry {
        &self.sockets
    }

    /// Place a new node of the named component
    pub fn add_node(&mut self, component: &str, position: (f64, f64)) -> Result<NodeId> {
        let metadata = self.components.require(component)?;
        let node_id = self.graph.add_node(metadata, position);
        self.snapshot()?;
        self.emit(EditorEvent::NodeCreated {
            node_id,
            component: component.to_string(),
        });
        Ok(node_id)
    }

    /// Remove a node and every wire touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<()> {
        let dropped: Vec<Wire> = self
            .graph
            .wires()
            .iter()
            .filter(|w| w.touches(node_id))
            .cloned()
            .collect();
        let node = self.graph.remove_node(node_id)?;
        self.snapshot()?;
        for wire in dropped {
            self.emit(EditorEvent::ConnectionRemoved { wire });
        }
        self.emit(EditorEvent::NodeRemoved {
            node_id,
            component: node.name().to_string(),
        });
        Ok(())
    }

    pub fn move_node(&mut self, node_id: NodeId, position: (f64, f64)) -> Result<()> {
        self.graph.move_node(node_id, position)?;
        self.snapshot()?;
        self.emit(EditorEvent::NodeMoved { node_id, position });
        Ok(())
    }

    /// Draw a wire
    ///
    /// A refused wire is reported as `ConnectionRejected` and returned as
    /// an error.
    pub fn connect(&mut self, wire: Wire) -> Result<()> {
        if let Err(e) = self.graph.connect(wire.clone(), &self.sockets) {
            if e.is_connection_rejection() {
                log::debug!("Rejected connection {}: {}", wire, e);
                self.emit(EditorEvent::ConnectionRejected {
                    wire,
                    reason: e.to_string(),
                });
            }
            return Err(e);
        }
        self.snapshot()?;
        self.emit(EditorEvent::ConnectionCreated { wire });
        Ok(())
    }

    pub fn disconnect(&mut self, wire: &Wire) -> Result<()> {
        self.graph.disconnect(wire)?;
        self.snapshot()?;
        self.emit(EditorEvent::ConnectionRemoved { wire: wire.clone() });
        Ok(())
    }

    /// Apply a control edit to its node's data
    pub fn set_control_value(
        &mut self,
        node_id: NodeId,
        key: &str,
        value: Value,
    ) -> Result<Option<Value>> {
        let previous = self
            .graph
            .set_control_value(ControlChange::new(node_id, key, value.clone()))?;
        self.snapshot()?;
        self.emit(EditorEvent::ControlChanged {
            node_id,
            key: key.to_string(),
            value,
        });
        Ok(previous)
    }

    /// Revert the last edit; `Ok(false)` when there is nothing to undo
    pub fn undo(&mut self) -> Result<bool> {
        match self.history.undo() {
            Some(document) => {
                self.restore(&document?)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-apply an undone edit; `Ok(false)` when there is nothing to redo
    pub fn redo(&mut self) -> Result<bool> {
        match self.history.redo() {
            Some(document) => {
                self.restore(&document?)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the graph with a stored flow and start a fresh history
    pub fn load_document(&mut self, document: &FlowDocument) -> Result<()> {
        let graph = FlowGraph::from_document(document, &self.components, &self.sockets)?;
        self.graph = graph;
        self.history.clear();
        self.snapshot()?;
        log::info!("Loaded flow '{}' ({} nodes)", self.graph.id(), self.graph.len());
        self.emit_replaced();
        Ok(())
    }

    /// Stored form of the current graph
    pub fn to_document(&self) -> FlowDocument {
        FlowDocument::from_graph(&self.graph)
    }

    fn restore(&mut self, document: &FlowDocument) -> Result<()> {
        self.graph = FlowGraph::from_document(document, &self.components, &self.sockets)?;
        self.emit_replaced();
        Ok(())
    }

    fn snapshot(&mut self) -> Result<()> {
        self.history.push(&FlowDocument::from_graph(&self.graph))?;
        log::trace!(
            "History holds {} snapshots ({} bytes)",
            self.history.len(),
            self.history.compressed_size()
        );
        Ok(())
    }

    fn emit_replaced(&self) {
        self.emit(EditorEvent::GraphReplaced {
            flow_id: self.graph.id().to_string(),
            node_count: self.graph.len(),
        });
    }

    fn emit(&self, event: EditorEvent) {
        if let Err(e) = self.events.send(event) {
            log::warn!("Dropped editor event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlKind;
    use crate::descriptor::{ComponentCategory, ComponentMetadata, PortMetadata};
    use crate::error::FlowGraphError;
    use crate::events::{EventError, VecEventSink};
    use crate::sockets::SocketType;
    use serde_json::json;
    use std::sync::Arc;

    fn components() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register(
            ComponentMetadata::new("Number", ComponentCategory::Value)
                .control("num", ControlKind::Number)
                .output(PortMetadata::output("num", "Number", SocketType::Number)),
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

    fn editor() -> (FlowEditor, Arc<VecEventSink>) {
        let sink = Arc::new(VecEventSink::new());
        let editor = FlowEditor::new(components(), SocketRegistry::standard())
            .unwrap()
            .with_event_sink(Arc::clone(&sink));
        (editor, sink)
    }

    #[test]
    fn test_edit_emits_events() {
        let (mut editor, sink) = editor();
        let number = editor.add_node("Number", (0.0, 0.0)).unwrap();
        let output = editor.add_node("Output", (200.0, 0.0)).unwrap();
        editor
            .connect(Wire::new(number, "num", output, "status"))
            .unwrap();
        editor.set_control_value(number, "num", json!(7)).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[2],
            EditorEvent::ConnectionCreated {
                wire: Wire::new(1, "num", 2, "status")
            }
        );
        assert_eq!(editor.graph().node(number).unwrap().value("num"), Some(&json!(7)));
    }

    #[test]
    fn test_rejected_connection_is_reported() {
        let (mut editor, sink) = editor();
        let number = editor.add_node("Number", (0.0, 0.0)).unwrap();
        let output = editor.add_node("Output", (200.0, 0.0)).unwrap();

        let err = editor
            .connect(Wire::new(number, "num", output, "payload"))
            .unwrap_err();
        assert!(matches!(err, FlowGraphError::IncompatibleSockets { .. }));
        assert!(editor.graph().wires().is_empty());
        assert!(matches!(
            sink.events().last(),
            Some(EditorEvent::ConnectionRejected { .. })
        ));
    }

    #[test]
    fn test_unknown_component() {
        let (mut editor, sink) = editor();
        assert!(matches!(
            editor.add_node("Teleport", (0.0, 0.0)),
            Err(FlowGraphError::UnknownComponent(_))
        ));
        assert!(sink.events().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_undo_redo_edits() {
        let (mut editor, _) = editor();
        let number = editor.add_node("Number", (0.0, 0.0)).unwrap();
        editor.set_control_value(number, "num", json!(3)).unwrap();
        editor.set_control_value(number, "num", json!(9)).unwrap();

        assert!(editor.undo().unwrap());
        assert_eq!(editor.graph().node(number).unwrap().value("num"), Some(&json!(3)));
        assert!(editor.undo().unwrap());
        assert!(editor.undo().unwrap());
        assert!(editor.graph().is_empty());
        assert!(!editor.undo().unwrap());

        assert!(editor.redo().unwrap());
        assert_eq!(editor.graph().len(), 1);
    }

    #[test]
    fn test_remove_node_reports_dropped_wires() {
        let (mut editor, sink) = editor();
        let number = editor.add_node("Number", (0.0, 0.0)).unwrap();
        let output = editor.add_node("Output", (200.0, 0.0)).unwrap();
        editor
            .connect(Wire::new(number, "num", output, "status"))
            .unwrap();
        sink.clear();

        editor.remove_node(number).unwrap();
        let events = sink.events();
        assert_eq!(
            events,
            vec![
                EditorEvent::ConnectionRemoved {
                    wire: Wire::new(number, "num", output, "status")
                },
                EditorEvent::NodeRemoved {
                    node_id: number,
                    component: "Number".to_string()
                },
            ]
        );
        assert!(editor.graph().wires().is_empty());
    }

    struct ClosedSink;

    impl EventSink for ClosedSink {
        fn send(&self, _event: EditorEvent) -> std::result::Result<(), EventError> {
            Err(EventError("view closed".to_string()))
        }
    }

    #[test]
    fn test_undeliverable_event_keeps_edit() {
        let mut editor = FlowEditor::new(components(), SocketRegistry::standard())
            .unwrap()
            .with_event_sink(ClosedSink);
        let number = editor.add_node("Number", (0.0, 0.0)).unwrap();
        assert!(editor.graph().node(number).is_some());
        assert!(editor.can_undo());
    }

    #[test]
    fn test_load_document_resets_history() {
        let (mut editor, _) = editor();
        editor.add_node("Number", (0.0, 0.0)).unwrap();
        let document = editor.to_document();

        let (mut other, sink) = self::editor();
        other.load_document(&document).unwrap();
        assert_eq!(other.graph(), editor.graph());
        assert!(!other.can_undo());
        assert!(matches!(
            sink.events().last(),
            Some(EditorEvent::GraphReplaced { node_count: 1, .. })
        ));
    }
}
