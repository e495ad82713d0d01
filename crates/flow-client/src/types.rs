//! Store records and request bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;

use flow_graph::FlowDocument;

use crate::constants::defaults;

/// Revision bookkeeping of one named flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMeta {
    pub name: String,
    /// Highest saved revision
    #[serde(default)]
    pub latest_rev: i64,
    /// Revision served to callers
    #[serde(default)]
    pub active_rev: i64,
}

/// One saved revision of a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub name: String,
    pub rev: i64,
    /// Sample payload saved alongside the flow
    #[serde(default)]
    pub payload: Value,
    /// The flow document
    pub flow: Value,
    /// Save time in milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
}

impl FlowRecord {
    /// Parse the stored flow
    pub fn document(&self) -> crate::Result<FlowDocument> {
        Ok(FlowDocument::from_value(self.flow.clone())?)
    }
}

/// Body of `POST /flows/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    pub name: String,
    pub payload: Value,
    pub flow: Value,
}

/// Answer to a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Revision assigned by the store
    pub rev: i64,
}

/// Body of `POST /flows/{name}/setactive`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub rev: i64,
}

/// Body of `POST /flowtest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRequest {
    pub payload: Value,
    pub flow: Value,
}

/// Outcome of running a flow
///
/// Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Revision that ran; `-1` for dry runs
    pub rev: i64,
    #[serde(default)]
    pub timestamp: i64,
    /// HTTP status the flow answered with
    #[serde(default = "default_run_status")]
    pub status: u16,
}

fn default_run_status() -> u16 {
    defaults::RUN_STATUS
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// Whether a store answer is the empty object it sends for "nothing found"
pub(crate) fn is_empty_answer(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty()) || value.is_null()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_store() {
        let record: FlowRecord = serde_json::from_value(json!({
            "_id": {"$oid": "5f1c"},
            "name": "orders",
            "rev": 3,
            "payload": {"items": []},
            "flow": {"id": "flows@1.0.0", "nodes": {}},
            "timestamp": 1595000000000i64
        }))
        .unwrap();
        assert_eq!(record.rev, 3);
        assert!(record.document().unwrap().nodes.is_empty());
    }

    #[test]
    fn test_run_result_shapes() {
        let ok: RunResult =
            serde_json::from_value(json!({"data": {"n": 1}, "rev": -1, "timestamp": 1})).unwrap();
        assert!(ok.is_success());
        let failed: RunResult =
            serde_json::from_value(json!({"error": "boom", "rev": 2, "timestamp": 1})).unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.status, 200);
    }

    #[test]
    fn test_empty_answer() {
        assert!(is_empty_answer(&json!({})));
        assert!(is_empty_answer(&Value::Null));
        assert!(!is_empty_answer(&json!([])));
        assert!(!is_empty_answer(&json!({"name": "x"})));
    }
}
