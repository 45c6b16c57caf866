//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use homelist_config::ConfigError;
use homelist_core::CoreError;

/// Process exit codes.
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
    #[error("Could not connect to the listings API at {url}")]
    #[diagnostic(
        code(homelist::connection_failed),
        help(
            "Check that the listings server is running and reachable.\n\
             Reason: {reason}\n\
             Override the address with --api-url or HOMELIST_API_URL."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(homelist::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(homelist::not_found),
        help("Run: homelist {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(homelist::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid listing")]
    #[diagnostic(
        code(homelist::invalid_listing),
        help("{details}\nRun: homelist cities to see accepted cities")
    )]
    InvalidListing { details: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(homelist::validation))]
    Validation { field: String, reason: String },

    // ── Favorites ────────────────────────────────────────────────────
    #[error("Favorites could not be saved")]
    #[diagnostic(
        code(homelist::persistence),
        help(
            "{message}\n\
             Check permissions on the favorites file, or choose another with --favorites."
        )
    )]
    Persistence { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(homelist::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(homelist::config))]
    Config(#[from] ConfigError),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(homelist::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(homelist::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::InvalidListing { .. }
            | Self::ConfigExists { .. }
            | Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Map a core error, naming the home that was looked up.
    pub fn for_home(id: impl ToString) -> impl FnOnce(CoreError) -> Self {
        move |err| match err {
            CoreError::NotFound { .. } => Self::NotFound {
                resource_type: "home".into(),
                identifier: id.to_string(),
                list_command: "homes list".into(),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NotFound { resource } => CliError::NotFound {
                resource_type: "home".into(),
                identifier: resource,
                list_command: "homes list".into(),
            },
            CoreError::Validation { errors } => CliError::InvalidListing {
                details: errors
                    .iter()
                    .map(|e| format!("  --{}: {}", e.field.to_string().replace('_', "-"), e.reason))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
            CoreError::Persistence { message } => CliError::Persistence { message },
            CoreError::Api { message, .. } => CliError::ApiError { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
