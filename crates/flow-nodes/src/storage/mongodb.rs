//! MongoDB query and update nodes

use flow_graph::{ComponentCategory, ComponentDescriptor, ComponentMetadata, PortMetadata, SocketType};
use serde_json::json;

use crate::constants::mongo;

pub const PORT_ACTION: &str = "action";
pub const PORT_DBNAME: &str = "dbname";
pub const PORT_COLNAME: &str = "colname";
pub const PORT_QUERY: &str = "query";
pub const PORT_LIMIT: &str = "limit";
pub const PORT_PAYLOAD: &str = "payload";
pub const PORT_JSON: &str = "json";

/// Seed the connection defaults shared by the triggered nodes
fn with_defaults(meta: ComponentMetadata) -> ComponentMetadata {
    meta.default_value(PORT_LIMIT, json!(mongo::DEFAULT_LIMIT))
        .default_value(PORT_QUERY, json!(mongo::DEFAULT_QUERY))
        .default_value(PORT_DBNAME, json!(mongo::DEFAULT_DATABASE))
        .default_value(PORT_COLNAME, json!(mongo::DEFAULT_COLLECTION))
}

fn query_result() -> PortMetadata {
    PortMetadata::output(PORT_JSON, "Query Result", SocketType::Json)
}

/// Untriggered query
pub struct MongoDb;

impl MongoDb {
    pub const NAME: &'static str = "MongoDB";
}

impl ComponentDescriptor for MongoDb {
    fn descriptor() -> ComponentMetadata {
        ComponentMetadata::new(Self::NAME, ComponentCategory::Storage)
            .describe("Query a collection")
            .input(PortMetadata::input(PORT_DBNAME, "Database Name", SocketType::String))
            .input(PortMetadata::input(PORT_COLNAME, "Collection Name", SocketType::String))
            .input(PortMetadata::input(PORT_QUERY, "Query String", SocketType::String))
            .input(PortMetadata::input(PORT_LIMIT, "Limit", SocketType::Number))
            .output(query_result())
    }
}

/// Query run when its action input fires
pub struct MongoDbGet;

impl MongoDbGet {
    pub const NAME: &'static str = "MongoDB Get";
}

impl ComponentDescriptor for MongoDbGet {
    fn descriptor() -> ComponentMetadata {
        let meta = ComponentMetadata::new(Self::NAME, ComponentCategory::Storage)
            .describe("Query a collection when triggered")
            .input(PortMetadata::action(PORT_ACTION, "Action"))
            .input(PortMetadata::input(PORT_DBNAME, "Database (Empty for default)", SocketType::String))
            .input(PortMetadata::input(PORT_COLNAME, "Collection", SocketType::String))
            .input(PortMetadata::input(PORT_QUERY, "Query String", SocketType::String))
            .input(PortMetadata::input(PORT_LIMIT, "Limit", SocketType::Number))
            .output(query_result());
        with_defaults(meta)
    }
}

/// Update run when its action input fires
pub struct MongoDbUpdate;

impl MongoDbUpdate {
    pub const NAME: &'static str = "MongoDB Update";
}

impl ComponentDescriptor for MongoDbUpdate {
    fn descriptor() -> ComponentMetadata {
        let meta = ComponentMetadata::new(Self::NAME, ComponentCategory::Storage)
            .describe("Update matching documents when triggered")
            .input(PortMetadata::action(PORT_ACTION, "Action"))
            .input(PortMetadata::input(PORT_DBNAME, "Database (Empty for default)", SocketType::String))
            .input(PortMetadata::input(PORT_COLNAME, "Collection Name", SocketType::String))
            .input(PortMetadata::input(PORT_QUERY, "Query String", SocketType::String))
            .input(PortMetadata::input(PORT_PAYLOAD, "JSON Payload", SocketType::Json))
            .output(query_result());
        with_defaults(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggered_nodes_gate_on_single_action() {
        for meta in [MongoDbGet::descriptor(), MongoDbUpdate::descriptor()] {
            let action = meta.find_input(PORT_ACTION).unwrap();
            assert_eq!(action.socket, SocketType::Action);
            assert!(!action.multiple);
            assert_eq!(meta.default_data["limit"], json!(20));
            assert_eq!(meta.default_data["query"], json!("deleted == false"));
            assert_eq!(meta.default_data["dbname"], json!("rules"));
            assert_eq!(meta.default_data["colname"], json!("cache"));
        }
    }

    #[test]
    fn test_update_takes_payload_not_limit() {
        let meta = MongoDbUpdate::descriptor();
        assert!(meta.find_input(PORT_PAYLOAD).is_some());
        assert!(meta.find_input(PORT_LIMIT).is_none());
        assert!(MongoDb::descriptor().find_input(PORT_ACTION).is_none());
    }
}
