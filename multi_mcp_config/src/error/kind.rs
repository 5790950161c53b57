//! Coarse classification of [`McpConfigError`](super::McpConfigError) values.

use std::fmt;

use super::McpConfigError;

/// The four failure families a caller can react to.
///
/// CLI layers match on this instead of on every error field so that they can
/// print targeted guidance ("file not found, tried: ..." versus "invalid JSON
/// at line ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// None of the candidate locations held a configuration file.
    NotFound,
    /// A file was located but could not be read.
    Read,
    /// The file content is not valid JSON, including content that is not
    /// UTF-8 at all.
    Parse,
    /// The JSON is valid but does not have the expected shape.
    Validation,
}

impl ErrorKind {
    /// Returns a short lowercase label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::Read => "read",
            Self::Parse => "parse",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl McpConfigError {
    /// Classifies the error.
    ///
    /// An unreadable working directory is reported as [`ErrorKind::Read`]
    /// because, like an unreadable file, it is an environment problem rather
    /// than a problem with the path the user supplied.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::CurrentDir { .. } | Self::Read { .. } => ErrorKind::Read,
            Self::Encoding { .. } | Self::Parse { .. } => ErrorKind::Parse,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }
}
