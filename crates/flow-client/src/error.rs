//! Error types for the flow store client

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised by flow store operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered with a body of unexpected shape
    #[error("Invalid store response: {0}")]
    InvalidResponse(String),

    /// Store URL could not be built
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// No flow with this name
    #[error("Flow not found: {0}")]
    FlowNotFound(String),

    /// Session token could not be decoded
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored flow could not be turned into a graph
    #[error(transparent)]
    Graph(#[from] flow_graph::FlowGraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Create an invalid response error with a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether the store refused the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}
