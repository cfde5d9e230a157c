//! Typed errors for the job scraper library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Extraction, normalization
//! and filtering never fail: they degrade to `None` or documented defaults,
//! so only fetching, sinks and configuration have error types.

use thiserror::Error;

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection reset, body read)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Request exceeded the client timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Errors raised by sink adapters.
#[derive(Debug, Error)]
pub enum SinkError {
    /// HTTP request to the API failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// API answered with something other than 200/201
    #[error("rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Worksheet file could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Worksheet row could not be encoded
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors while assembling a [`PipelineConfig`](crate::config::PipelineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is present but unusable
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    /// Filter rules file could not be read
    #[error("cannot read filter file: {0}")]
    Io(#[from] std::io::Error),

    /// Filter rules file is not valid JSON
    #[error("cannot parse filter file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while assembling a pipeline, before any job is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A configured sink could not be constructed
    #[error("sink setup failed: {0}")]
    Sink(#[from] SinkError),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for sink operations.
pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
