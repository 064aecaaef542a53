//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

use campus_core::CoreError;

/// Exit codes for scripting. Success is the implicit zero.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to server at {url}: {reason}")]
    #[diagnostic(
        code(campus::connection_failed),
        help(
            "Check that the administration server is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(campus::timeout),
        help("The server did not respond in time. Raise --timeout or check the server.")
    )]
    Timeout,

    // ── Configuration ────────────────────────────────────────────────
    #[error("No server configured")]
    #[diagnostic(
        code(campus::no_config),
        help(
            "Create a profile with: campus config init --server <URL>\n\
             Or pass --server / set CAMPUS_SERVER.\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(campus::config))]
    Config(#[from] campus_config::ConfigError),

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(campus::not_found),
        help("Run: campus {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(campus::validation))]
    Validation { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("The server rejected the request: {message}")]
    #[diagnostic(code(campus::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("{0}")]
    #[diagnostic(code(campus::operation_failed))]
    Operation(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(campus::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. }
            | Self::Api {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Map a core error by reference (handles both owned and `Arc`'d).
    pub fn from_core_ref(err: &CoreError) -> Self {
        match err {
            CoreError::Connection { url, reason } => Self::ConnectionFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            CoreError::Timeout { .. } => Self::Timeout,
            CoreError::NotFound { entity, identifier } => Self::NotFound {
                resource_type: entity.clone(),
                identifier: identifier.clone(),
                list_command: format!("{entity}s list"),
            },
            CoreError::Validation { field, reason } => Self::Validation {
                field: field.clone(),
                reason: reason.clone(),
            },
            CoreError::Api { message, status } => Self::Api {
                message: message.clone(),
                status: *status,
            },
            CoreError::Config { message } => Self::Operation(message.clone()),
            CoreError::Internal(message) => Self::Operation(message.clone()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core_ref(&err)
    }
}

impl From<Arc<CoreError>> for CliError {
    fn from(err: Arc<CoreError>) -> Self {
        Self::from_core_ref(&err)
    }
}
