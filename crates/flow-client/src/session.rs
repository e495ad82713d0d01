//! Authenticated session
//!
//! Holds the bearer token and its decoded claims. A `Session` is shared
//! (behind an `Arc`) by every client that talks to the store; login and
//! logout are explicit.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::defaults;
use crate::error::{ClientError, Result};

/// Claims carried in the token payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry in milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Decode the payload segment of a JWT without verifying it
    pub fn decode(token: &str) -> Result<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| ClientError::InvalidToken("expected three segments".to_string()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidToken(e.to_string()))
    }
}

#[derive(Debug, Clone)]
struct Credentials {
    token: String,
    claims: Claims,
}

/// Shared login state
#[derive(Debug)]
pub struct Session {
    credentials: RwLock<Option<Credentials>>,
    refresh_window_ms: i64,
}

impl Session {
    /// Logged-out session refreshing tokens within `refresh_window_ms` of expiry
    pub fn new(refresh_window_ms: i64) -> Self {
        Self {
            credentials: RwLock::new(None),
            refresh_window_ms,
        }
    }

    /// Store a token; on a malformed token the session is left unchanged
    pub fn login(&self, token: &str) -> Result<()> {
        let claims = Claims::decode(token)?;
        *self.credentials.write() = Some(Credentials {
            token: token.to_string(),
            claims,
        });
        log::debug!("Session logged in");
        Ok(())
    }

    pub fn logout(&self) {
        *self.credentials.write() = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.read().is_some()
    }

    /// Raw bearer token
    pub fn token(&self) -> Option<String> {
        self.credentials.read().as_ref().map(|c| c.token.clone())
    }

    pub fn claims(&self) -> Option<Claims> {
        self.credentials.read().as_ref().map(|c| c.claims.clone())
    }

    /// Whether the token expires within the refresh window of `now_ms`
    ///
    /// A logged-out session or a token without `exp` never needs refreshing.
    pub fn needs_refresh(&self, now_ms: i64) -> bool {
        self.credentials
            .read()
            .as_ref()
            .and_then(|c| c.claims.exp)
            .map(|exp| exp.saturating_sub(now_ms) <= self.refresh_window_ms)
            .unwrap_or(false)
    }

    pub fn refresh_window_ms(&self) -> i64 {
        self.refresh_window_ms
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(defaults::REFRESH_WINDOW_MS)
    }
}

/// Current time in milliseconds since the epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
