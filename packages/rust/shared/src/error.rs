//! Error types for confscrape.
//!
//! Library crates use [`ConfscrapeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Maximum number of response-body bytes carried in a [`ConfscrapeError::Status`].
const STATUS_BODY_LIMIT: usize = 1024;

/// Top-level error type for all confscrape operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfscrapeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("request error: {0}")]
    Request(String),

    /// Non-success HTTP status, carrying the code and a truncated body.
    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },

    /// Malformed response body.
    #[error("decode error: {0}")]
    Decode(String),

    /// Empty or invalid required argument.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ConfscrapeError>;

impl ConfscrapeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a status error; the body is trimmed and truncated to 1 KiB.
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let mut cut = body.len().min(STATUS_BODY_LIMIT);
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        Self::Status {
            code,
            body: body[..cut].trim().to_string(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
