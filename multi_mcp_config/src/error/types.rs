//! Primary error enum for resolution and loading flows.

use std::path::PathBuf;

use thiserror::Error;

use crate::resolve::Attempt;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, McpConfigError>;

/// Errors that can occur while resolving or loading an MCP configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum McpConfigError {
    /// No candidate location held a configuration file.
    #[error("configuration file '{raw}' not found; tried:\n{}", render_attempts(.attempts))]
    NotFound {
        /// Path string exactly as the caller supplied it.
        raw: String,
        /// Every candidate probed, in order.
        attempts: Vec<Attempt>,
    },

    /// The working directory was needed to anchor a relative path but could
    /// not be determined.
    #[error("cannot resolve '{raw}' against the current directory: {source}")]
    CurrentDir {
        /// Path string exactly as the caller supplied it.
        raw: String,
        /// Error reported by the operating system.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        /// File that failed to open or read.
        path: PathBuf,
        /// Error reported by the operating system.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("invalid JSON in configuration file '{path}': {source}")]
    Parse {
        /// File containing the malformed document.
        path: PathBuf,
        /// One-based line of the fault.
        line: usize,
        /// One-based column of the fault.
        column: usize,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file is not UTF-8 text.
    #[error("configuration file '{path}' is not valid UTF-8 (byte {valid_up_to}): {source}")]
    Encoding {
        /// File containing the invalid bytes.
        path: PathBuf,
        /// Length of the valid UTF-8 prefix, i.e. the offset of the first
        /// invalid byte.
        valid_up_to: usize,
        /// Underlying decoding error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// The document parsed but lacks the expected structure.
    #[error("invalid configuration in '{path}' at '{key}': {message}")]
    Validation {
        /// File containing the document.
        path: PathBuf,
        /// Key (or dotted key path) that failed validation.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },
}

impl McpConfigError {
    /// Builds a [`Self::Parse`] error, lifting the position out of `source`.
    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    /// Builds a [`Self::Validation`] error.
    pub(crate) fn validation(
        path: impl Into<PathBuf>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            path: path.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Candidates probed before giving up, when the error is
    /// [`Self::NotFound`].
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        match self {
            Self::NotFound { attempts, .. } => attempts,
            _ => &[],
        }
    }
}

fn render_attempts(attempts: &[Attempt]) -> String {
    if attempts.is_empty() {
        return String::from("  (no candidates)");
    }
    attempts
        .iter()
        .map(|attempt| format!("  {attempt}"))
        .collect::<Vec<_>>()
        .join("\n")
}
