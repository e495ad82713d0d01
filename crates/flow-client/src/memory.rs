//! In-process flow store
//!
//! Keeps the same revision bookkeeping as the remote store. There is no
//! executor in process, so `test` echoes the payload back.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use flow_graph::FlowDocument;

use crate::constants::{defaults, TEST_REVISION};
use crate::error::{ClientError, Result};
use crate::session::now_millis;
use crate::store::FlowStore;
use crate::types::{FlowMeta, FlowRecord, RunResult, SaveResponse};

#[derive(Debug, Default)]
struct StoredFlow {
    meta: Option<FlowMeta>,
    revisions: Vec<FlowRecord>,
}

/// Flow store held in memory
#[derive(Debug, Default)]
pub struct MemoryFlowStore {
    flows: RwLock<BTreeMap<String, StoredFlow>>,
}

impl MemoryFlowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlowStore for MemoryFlowStore {
    async fn list(&self) -> Result<Vec<FlowMeta>> {
        Ok(self
            .flows
            .read()
            .values()
            .filter_map(|f| f.meta.clone())
            .collect())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<FlowRecord>> {
        let latest = match self.get_meta_by_name(name).await? {
            Some(meta) => meta.latest_rev,
            None => return Ok(None),
        };
        self.get_by_name_and_revision(name, latest).await
    }

    async fn get_by_name_and_revision(&self, name: &str, rev: i64) -> Result<Option<FlowRecord>> {
        Ok(self
            .flows
            .read()
            .get(name)
            .and_then(|f| f.revisions.iter().find(|r| r.rev == rev))
            .cloned())
    }

    async fn get_meta_by_name(&self, name: &str) -> Result<Option<FlowMeta>> {
        Ok(self.flows.read().get(name).and_then(|f| f.meta.clone()))
    }

    async fn save(&self, name: &str, payload: &Value, flow: &FlowDocument) -> Result<SaveResponse> {
        let flow = flow.to_value()?;
        let mut flows = self.flows.write();
        let stored = flows.entry(name.to_string()).or_default();

        let rev = stored.revisions.iter().map(|r| r.rev).max().unwrap_or(0) + 1;
        stored.revisions.push(FlowRecord {
            name: name.to_string(),
            rev,
            payload: payload.clone(),
            flow,
            timestamp: now_millis(),
        });
        let meta = stored.meta.get_or_insert_with(|| FlowMeta {
            name: name.to_string(),
            latest_rev: rev,
            active_rev: rev,
        });
        meta.latest_rev = rev;

        log::debug!("Saved flow '{}' rev {}", name, rev);
        Ok(SaveResponse { rev })
    }

    async fn set_active(&self, name: &str, rev: i64) -> Result<()> {
        let mut flows = self.flows.write();
        let meta = flows
            .get_mut(name)
            .and_then(|f| f.meta.as_mut())
            .ok_or_else(|| ClientError::FlowNotFound(name.to_string()))?;
        meta.active_rev = rev;
        Ok(())
    }

    async fn test(&self, payload: &Value, _flow: &FlowDocument) -> Result<RunResult> {
        Ok(RunResult {
            data: Some(payload.clone()),
            error: None,
            rev: TEST_REVISION,
            timestamp: now_millis(),
            status: defaults::RUN_STATUS,
        })
    }
}
