//! Flow Client
//!
//! Persistence and dry-run execution of flows against the remote flow
//! store, plus an in-memory store with the same revision semantics.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use flow_client::{ClientConfig, FlowStore, HttpFlowStore, Session};
//!
//! let config = ClientConfig::from_env()?;
//! let session = Arc::new(Session::new(config.refresh_window_ms));
//! session.login(&token)?;
//! let store = HttpFlowStore::new(config, session)?;
//! for meta in store.list().await? {
//!     println!("{} (active rev {})", meta.name, meta.active_rev);
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod memory;
pub mod session;
pub mod store;
pub mod types;

pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, Result};
pub use http::HttpFlowStore;
pub use memory::MemoryFlowStore;
pub use session::{Claims, Session};
pub use store::{load_graph, FlowStore};
pub use types::{FlowMeta, FlowRecord, RunResult, SaveResponse};
