//! Client constants

/// Default values
pub mod defaults {
    /// Flow store base URL
    pub const API_URL: &str = "http://localhost:8000";

    /// Request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;

    /// Refresh the session token when it expires within this many milliseconds
    pub const REFRESH_WINDOW_MS: i64 = 60_000;

    /// Status of a run whose flow sets none
    pub const RUN_STATUS: u16 = 200;
}

/// Environment variables read by `ClientConfig::from_env`
pub mod env {
    pub const API_URL: &str = "FLOWVIEW_API_URL";
    pub const TIMEOUT_SECS: &str = "FLOWVIEW_TIMEOUT_SECS";
}

/// Store routes, relative to the API URL
pub mod routes {
    pub const FLOWS: &str = "/flows";
    pub const FLOW_TEST: &str = "/flowtest";
    pub const TOKEN_REFRESH: &str = "/users/token";
}

/// Configuration file name inside the config directory
pub const CONFIG_FILE: &str = "config.json";

/// Revision reported by dry runs, which are not stored
pub const TEST_REVISION: i64 = -1;
