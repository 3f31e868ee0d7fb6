//! Error types for `logtint`
//!
//! Per-record rendering failures live in [`RenderError`]; everything the CLI
//! can fail with is aggregated into [`LogtintError`], which also maps onto
//! process exit codes.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `logtint` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid flag or environment override)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, broken pipe)
    pub const IO_ERROR: i32 = 3;

    /// A record failed to render and the run was asked to stop on failure
    pub const RENDER_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `logtint` operations.
#[derive(Debug, Error)]
pub enum LogtintError {
    /// A record could not be rendered
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Invalid configuration value
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input could not be opened or read
    #[error("cannot read {path}: {source}")]
    Input {
        /// Path of the input
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogtintError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Render(RenderError::Io(_)) | Self::Input { .. } | Self::Io(_) => {
                ExitCode::IO_ERROR
            }
            Self::Render(_) => ExitCode::RENDER_ERROR,
            Self::Config(_) => ExitCode::CONFIG_ERROR,
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Failure to render a single record.
///
/// Every variant except [`RenderError::Io`] is local to the record that
/// caused it: the renderer keeps working for the records that follow.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The record is not a well-formed JSON object
    #[error("cannot decode event: {0}")]
    Decode(#[source] serde_json::Error),

    /// The `timestamp` field is present but does not match the input format
    #[error("cannot parse timestamp '{value}': {source}")]
    Timestamp {
        /// The raw timestamp text
        value: String,
        /// Error from the time parser
        #[source]
        source: chrono::ParseError,
    },

    /// The record exceeds the configured size limit
    #[error("record too large: {size} bytes (limit: {limit})")]
    TooLarge {
        /// Actual record size in bytes
        size: usize,
        /// Configured size limit in bytes
        limit: usize,
    },

    /// Writing to the sink failed
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Returns `true` if the failure was caused by the record itself rather
    /// than by the sink.
    #[must_use]
    pub const fn is_record_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

impl From<RenderError> for std::io::Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Io(io) => io,
            other => Self::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration errors raised while resolving flags and environment
/// overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field (or environment variable) with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `logtint` operations.
pub type Result<T> = std::result::Result<T, LogtintError>;

// ============================================================================
// Tests
// ============================================================================
