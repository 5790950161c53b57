//! Error types and exit codes for `multi-mcp-config-check`.

use multi_mcp_config::{ErrorKind, McpConfigError};
use thiserror::Error;

/// Errors surfaced by the `multi-mcp-config-check` pipeline.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Resolving or loading the configuration failed.
    #[error(transparent)]
    Config(#[from] McpConfigError),

    /// The JSON report could not be serialised.
    #[error("failed to serialise report: {0}")]
    Report(#[from] serde_json::Error),

    /// Writing the report to stdout failed.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Exit status for command-line usage errors.
///
/// Distinct from every configuration outcome so scripts can tell a mistyped
/// flag from a missing file.
pub const USAGE_EXIT_CODE: u8 = 64;

/// Exit status for a failed argument parse.
///
/// `--help` and `--version` surface as clap errors too; they keep clap's
/// success status.
#[must_use]
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { USAGE_EXIT_CODE } else { 0 }
}

impl CheckError {
    /// Process exit status for this error.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 2 | configuration file not found |
    /// | 3 | configuration file unreadable |
    /// | 4 | invalid JSON or not UTF-8 |
    /// | 5 | unexpected document shape |
    /// | 1 | anything else |
    ///
    /// Usage errors exit with [`USAGE_EXIT_CODE`] before any of these.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(err) => match err.kind() {
                ErrorKind::NotFound => 2,
                ErrorKind::Read => 3,
                ErrorKind::Parse => 4,
                ErrorKind::Validation => 5,
            },
            Self::Report(_) | Self::Output(_) => 1,
        }
    }

    /// A hint printed after the error message, when one helps.
    #[must_use]
    pub fn guidance(&self) -> Option<String> {
        let Self::Config(err) = self else {
            return None;
        };
        match err {
            McpConfigError::NotFound { attempts, .. }
                if attempts.iter().any(|attempt| attempt.candidate.origin.is_fallback()) =>
            {
                Some(String::from(
                    "create the file at one of the paths above or pass --config",
                ))
            }
            McpConfigError::NotFound { .. } => Some(String::from(
                "home directory fallbacks are only searched from a package store with a known \
                 home directory; pass an absolute path, set HOME, or add --store-marker",
            )),
            McpConfigError::Read { .. } | McpConfigError::CurrentDir { .. } => {
                Some(String::from("check that the file and its directory are readable"))
            }
            McpConfigError::Encoding { valid_up_to, .. } => Some(format!(
                "re-save the file as UTF-8; the first invalid byte is at offset {valid_up_to}"
            )),
            McpConfigError::Parse { line, column, .. } => {
                Some(format!("fix the JSON syntax near line {line}, column {column}"))
            }
            McpConfigError::Validation { key, .. } => {
                Some(format!("check the '{key}' entry against the expected layout"))
            }
            _ => None,
        }
    }
}
