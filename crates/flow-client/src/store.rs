//! The flow store contract

use async_trait::async_trait;
use serde_json::Value;

use flow_graph::{ComponentRegistry, FlowDocument, FlowGraph, SocketRegistry};

use crate::error::{ClientError, Result};
use crate::types::{FlowMeta, FlowRecord, RunResult, SaveResponse};

/// Named, revisioned flow storage with dry-run execution
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Summaries of every stored flow
    async fn list(&self) -> Result<Vec<FlowMeta>>;

    /// Latest revision of a flow
    async fn get_by_name(&self, name: &str) -> Result<Option<FlowRecord>>;

    async fn get_by_name_and_revision(&self, name: &str, rev: i64) -> Result<Option<FlowRecord>>;

    /// First summary matching the name
    async fn get_meta_by_name(&self, name: &str) -> Result<Option<FlowMeta>>;

    /// Store a new revision
    async fn save(&self, name: &str, payload: &Value, flow: &FlowDocument) -> Result<SaveResponse>;

    /// Mark a revision as the one served to callers
    async fn set_active(&self, name: &str, rev: i64) -> Result<()>;

    /// Run a flow against a sample payload without storing it
    async fn test(&self, payload: &Value, flow: &FlowDocument) -> Result<RunResult>;
}

/// Fetch a flow and rebuild it as a graph
///
/// `rev` of `None` loads the latest revision.
pub async fn load_graph(
    store: &dyn FlowStore,
    name: &str,
    rev: Option<i64>,
    components: &ComponentRegistry,
    sockets: &SocketRegistry,
) -> Result<FlowGraph> {
    let record = match rev {
        Some(rev) => store.get_by_name_and_revision(name, rev).await?,
        None => store.get_by_name(name).await?,
    }
    .ok_or_else(|| ClientError::FlowNotFound(name.to_string()))?;

    let graph = FlowGraph::from_document(&record.document()?, components, sockets)?;
    log::info!("Loaded flow '{}' rev {} ({} nodes)", name, record.rev, graph.len());
    Ok(graph)
}
