//! Flow Nodes
//!
//! The built-in components of the flow editor. Each component describes
//! its ports, controls and default data; execution belongs to the external
//! flow executor.
//!
//! # Categories
//!
//! - **Boundary**: the flow's request payload and its result
//! - **Value**: constants edited in place
//! - **Processing**: array aggregates, conversions, arithmetic and templates
//! - **Storage**: MongoDB reads and updates
//! - **Control**: branching and user scripts

pub mod boundary;
pub mod constants;
pub mod control;
pub mod kind;
pub mod processing;
pub mod setup;
pub mod storage;
pub mod value;

pub use boundary::*;
pub use control::*;
pub use kind::ComponentKind;
pub use processing::*;
pub use setup::{builtin_registry, builtin_sockets};
pub use storage::*;
pub use value::*;

#[cfg(test)]
mod tests {
    use super::*;
    use flow_graph::{validate_flow, ComponentCategory, FlowBuilder, FlowDocument, FlowEditor, FlowGraph, Wire};
    use serde_json::json;

    #[test]
    fn test_registry_collects_all_builtins() {
        let registry = builtin_registry();
        assert_eq!(registry.len(), 28);
        assert!(registry.has_component("Input"));
        assert!(registry.has_component("Array Sum"));
        assert!(registry.has_component("MongoDB Update"));
        assert!(registry.has_component("Script"));

        let by_category = registry.metadata_by_category();
        assert_eq!(by_category[&ComponentCategory::Storage].len(), 3);
        assert_eq!(by_category[&ComponentCategory::Control].len(), 2);
    }

    #[test]
    fn test_building_a_node_is_idempotent() {
        let registry = builtin_registry();
        let meta = registry.get("MongoDB Get").unwrap();
        let mut graph = FlowGraph::default();
        let id = graph.add_node(meta, (0.0, 0.0));
        let first = graph.node(id).unwrap().clone();

        let reloaded = FlowGraph::from_document(
            &FlowDocument::from_graph(&graph),
            &registry,
            &builtin_sockets(),
        )
        .unwrap();
        assert_eq!(reloaded.node(id), Some(&first));
        assert_eq!(first.value("limit"), Some(&json!(20)));
    }

    #[test]
    fn test_rest_flow() {
        let components = builtin_registry();
        let sockets = builtin_sockets();
        let graph = FlowBuilder::new(&components, &sockets)
            .add_node("Input", (0.0, 0.0))
            .add_node("Array Sum", (200.0, 0.0))
            .with_value("field", json!("price"))
            .add_node("ToJson", (400.0, 0.0))
            .with_value("name", json!("total"))
            .add_node("Output", (600.0, 0.0))
            .connect(1, "payload", 2, "payload")
            .connect(2, "float", 3, "data")
            .connect(3, "json", 4, "payload")
            .build()
            .unwrap();

        assert!(validate_flow(&graph, &components, &sockets).is_empty());
        let sum = graph.node(2).unwrap();
        assert_eq!(ArraySum::field_mode(sum.data()), SumMode::Field("price".to_string()));
        assert_eq!(ToJson::wrap_key(graph.node(3).unwrap().data()), "total");
    }

    #[test]
    fn test_condition_branch_gating() {
        let mut editor = FlowEditor::new(builtin_registry(), builtin_sockets()).unwrap();
        let first = editor.add_node("Condition", (0.0, 0.0)).unwrap();
        let second = editor.add_node("Condition", (0.0, 100.0)).unwrap();
        let script = editor.add_node("Script", (200.0, 0.0)).unwrap();

        editor.connect(Wire::new(first, "true", script, "action")).unwrap();
        let err = editor
            .connect(Wire::new(second, "false", script, "action"))
            .unwrap_err();
        assert!(err.is_connection_rejection());

        let number = editor.add_node("Number", (0.0, 200.0)).unwrap();
        assert!(editor.connect(Wire::new(number, "num", script, "action")).is_err());
        editor.connect(Wire::new(number, "num", first, "left")).unwrap();
    }
}
