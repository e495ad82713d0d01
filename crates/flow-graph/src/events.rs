//! Editor events
//!
//! Every accepted edit and every rejected connection is reported to an
//! [`EventSink`], so a view (or a test) can follow the editor without
//! polling the graph.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{NodeId, Wire};

/// Receiver of editor events
pub trait EventSink: Send + Sync {
    /// Deliver one event; a failure is logged by the editor and the edit
    /// still stands
    fn send(&self, event: EditorEvent) -> Result<(), EventError>;
}

/// An event the sink could not take
#[derive(Debug, Clone, thiserror::Error)]
#[error("Editor event not delivered: {0}")]
pub struct EventError(pub String);

/// Events emitted while editing a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    #[serde(rename_all = "camelCase")]
    NodeCreated { node_id: NodeId, component: String },

    #[serde(rename_all = "camelCase")]
    NodeRemoved { node_id: NodeId, component: String },

    #[serde(rename_all = "camelCase")]
    NodeMoved { node_id: NodeId, position: (f64, f64) },

    ConnectionCreated { wire: Wire },

    /// A wire was refused; the graph is unchanged
    ConnectionRejected { wire: Wire, reason: String },

    ConnectionRemoved { wire: Wire },

    #[serde(rename_all = "camelCase")]
    ControlChanged {
        node_id: NodeId,
        key: String,
        value: Value,
    },

    /// The whole graph was replaced (load, undo or redo)
    #[serde(rename_all = "camelCase")]
    GraphReplaced { flow_id: String, node_count: usize },
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: EditorEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
#[derive(Default)]
pub struct VecEventSink {
    events: Mutex<Vec<EditorEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().clone()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: EditorEvent) -> Result<(), EventError> {
        self.events.lock().push(event);
        Ok(())
    }
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn send(&self, event: EditorEvent) -> Result<(), EventError> {
        (**self).send(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vec_event_sink() {
        let sink = VecEventSink::new();
        sink.send(EditorEvent::NodeCreated {
            node_id: 1,
            component: "Number".to_string(),
        })
        .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            EditorEvent::NodeCreated { node_id, component } => {
                assert_eq!(*node_id, 1);
                assert_eq!(component, "Number");
            }
            _ => panic!("Expected NodeCreated event"),
        }

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_event_wire_format() {
        let event = EditorEvent::ConnectionRejected {
            wire: Wire::new(1, "payload", 2, "status"),
            reason: "Cannot connect Json output to Number input".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "connectionRejected");
        assert_eq!(value["wire"]["from"], 1);
        assert_eq!(value["wire"]["input"], "status");

        let changed = EditorEvent::ControlChanged {
            node_id: 3,
            key: "num".to_string(),
            value: json!(4),
        };
        assert_eq!(serde_json::to_value(&changed).unwrap()["nodeId"], 3);
    }

    #[test]
    fn test_null_event_sink() {
        NullEventSink
            .send(EditorEvent::GraphReplaced {
                flow_id: "flows@1.0.0".to_string(),
                node_count: 0,
            })
            .unwrap();
    }
}
