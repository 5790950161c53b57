//! Reading, parsing and validating configuration files.
//!
//! [`ConfigLoader`] reads a resolved file in one go, parses it as JSON and
//! checks the minimal shape the launcher relies on:
//!
//! ```json
//! { "mcpServers": { "<name>": { "command": "<string>", "args": ["<string>"] } } }
//! ```
//!
//! Either the whole document is valid or loading fails; there is no partial
//! result.

mod document;
mod duplicates;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

pub use document::{ConfigDocument, ServerDescriptor};

use self::duplicates::{Duplicate, find_duplicate};
use crate::resolve::ResolvedPath;
use crate::{ConfigResult, DEFAULT_SECTION_KEY, McpConfigError};

/// How repeated object keys are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Reject repeated server names, and a repeated section key, with
    /// [`McpConfigError::Validation`].
    #[default]
    Reject,
    /// Keep the last occurrence silently.
    LastWins,
}

/// Loads configuration documents from resolved paths.
///
/// # Examples
///
/// ```rust,no_run
/// use multi_mcp_config::{ConfigLoader, PathResolver};
///
/// let resolved = PathResolver::default().resolve("mcp.json")?;
/// let document = ConfigLoader::default().load(&resolved)?;
/// for name in document.server_names() {
///     println!("{name}");
/// }
/// # Ok::<(), multi_mcp_config::McpConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoader {
    section_key: String,
    duplicate_keys: DuplicateKeys,
}

impl ConfigLoader {
    /// Creates a loader expecting the `mcpServers` section and rejecting
    /// duplicate keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            section_key: String::from(DEFAULT_SECTION_KEY),
            duplicate_keys: DuplicateKeys::Reject,
        }
    }

    /// Sets the top-level key holding the server map.
    #[must_use]
    pub fn section_key(mut self, key: impl Into<String>) -> Self {
        self.section_key = key.into();
        self
    }

    /// Sets the duplicate-key policy.
    #[must_use]
    pub const fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Loads the file at a resolved path.
    ///
    /// # Errors
    ///
    /// See [`Self::load_path`].
    pub fn load(&self, resolved: &ResolvedPath) -> ConfigResult<ConfigDocument> {
        self.load_path(resolved.path())
    }

    /// Loads the file at `path` without resolving it first.
    ///
    /// # Errors
    ///
    /// Returns [`McpConfigError::Read`] if the file cannot be read,
    /// [`McpConfigError::Encoding`] if it is not UTF-8,
    /// [`McpConfigError::Parse`] if it is not valid JSON, and
    /// [`McpConfigError::Validation`] if the shape is wrong.
    pub fn load_path(&self, path: &Path) -> ConfigResult<ConfigDocument> {
        let bytes = std::fs::read(path).map_err(|source| McpConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|err| McpConfigError::Encoding {
            path: path.to_path_buf(),
            valid_up_to: err.utf8_error().valid_up_to(),
            source: err.utf8_error(),
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read configuration file");
        self.parse(path, &text)
    }

    /// Parses and validates `text` as if it had been read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`McpConfigError::Parse`] for malformed JSON (including an
    /// empty document) and [`McpConfigError::Validation`] for a missing or
    /// non-object section or a rejected duplicate key.
    pub fn parse(&self, path: &Path, text: &str) -> ConfigResult<ConfigDocument> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| McpConfigError::parse(path, err))?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(McpConfigError::validation(
                    path,
                    "<document>",
                    format!("expected a JSON object at the top level, found {}", describe(&other)),
                ));
            }
        };
        match object.get(&self.section_key) {
            Some(Value::Object(_)) => {}
            Some(other) => {
                return Err(McpConfigError::validation(
                    path,
                    &self.section_key,
                    format!(
                        "expected an object mapping server names to descriptors, found {}",
                        describe(other)
                    ),
                ));
            }
            None => {
                return Err(McpConfigError::validation(
                    path,
                    &self.section_key,
                    "required section is missing",
                ));
            }
        }
        if self.duplicate_keys == DuplicateKeys::Reject {
            self.reject_duplicates(path, text)?;
        }
        ConfigDocument::from_object(path, &self.section_key, object).ok_or_else(|| {
            McpConfigError::validation(path, &self.section_key, "required section is missing")
        })
    }

    fn reject_duplicates(&self, path: &Path, text: &str) -> ConfigResult<()> {
        match find_duplicate(text, &self.section_key) {
            Ok(None) => Ok(()),
            Ok(Some(Duplicate::Section)) => Err(McpConfigError::validation(
                path,
                &self.section_key,
                "section appears more than once",
            )),
            Ok(Some(Duplicate::Server(name))) => Err(McpConfigError::validation(
                path,
                format!("{}.{name}", self.section_key),
                "server name appears more than once",
            )),
            Err(err) => Err(McpConfigError::parse(path, err)),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests;
