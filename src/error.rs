//! Error types for recur
//!
//! Exit codes:
//! - 0: Run completed (individual passes may still have logged errors)
//! - 1: Initialization failed (config, token, connect, name resolution)

use thiserror::Error;

/// Exit codes for the recur CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INIT_FAILED: i32 = 1;
}

/// Main error type for recur operations
#[derive(Error, Debug)]
pub enum Error {
    // Fatal before any pass runs
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No Todoist API token: pass --token or set TODOIST_TOKEN")]
    MissingToken,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Unknown label in configuration: {0}")]
    UnknownLabel(String),

    #[error("Unknown project in configuration: {0}")]
    UnknownProject(String),

    // Recoverable at the pass level: caught and logged, the other pass
    // still runs and the process exits 0
    #[error("Network error: {0}")]
    Network(String),

    #[error("Commit rejected by Todoist: {0}")]
    Commit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error.
    ///
    /// Pass-level failures are caught and logged before they can reach
    /// `main`, so any error that surfaces there aborted initialization.
    pub fn exit_code(&self) -> i32 {
        exit_codes::INIT_FAILED
    }
}

/// Result type alias for recur operations
pub type Result<T> = std::result::Result<T, Error>;
