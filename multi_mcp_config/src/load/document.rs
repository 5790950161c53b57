//! Parsed configuration documents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ConfigResult, McpConfigError};

/// Launch description for one MCP server.
///
/// The loader never requires entries to have this shape; it is a typed view
/// for collaborators that spawn the servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Executable to launch.
    pub command: String,
    /// Arguments passed to the executable, in order.
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment variables for the process.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// A validated configuration document.
///
/// The section named by [`Self::section_key`] is guaranteed to be a JSON
/// object mapping server names to descriptors. Other top-level keys are kept
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    path: PathBuf,
    section_key: String,
    servers: Map<String, Value>,
    rest: Map<String, Value>,
}

impl ConfigDocument {
    /// Splits a validated top-level object into the server section and the
    /// remaining keys. Returns `None` if the section is absent or not an
    /// object.
    pub(super) fn from_object(
        path: &Path,
        section_key: &str,
        mut document: Map<String, Value>,
    ) -> Option<Self> {
        match document.remove(section_key) {
            Some(Value::Object(servers)) => Some(Self {
                path: path.to_path_buf(),
                section_key: section_key.to_owned(),
                servers,
                rest: document,
            }),
            _ => None,
        }
    }

    /// File the document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level key holding the server map.
    #[must_use]
    pub fn section_key(&self) -> &str {
        &self.section_key
    }

    /// The server-name-to-descriptor map.
    #[must_use]
    pub const fn servers(&self) -> &Map<String, Value> {
        &self.servers
    }

    /// Server names in sorted order.
    pub fn server_names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    /// Top-level keys other than the server section.
    #[must_use]
    pub const fn other_sections(&self) -> &Map<String, Value> {
        &self.rest
    }

    /// Deserialises every server entry into a [`ServerDescriptor`].
    ///
    /// # Errors
    ///
    /// Returns [`McpConfigError::Validation`] naming `<section>.<server>` for
    /// the first entry that lacks a `command` string or has malformed
    /// `args`/`env`.
    pub fn server_descriptors(&self) -> ConfigResult<BTreeMap<String, ServerDescriptor>> {
        self.servers
            .iter()
            .map(|(name, value)| {
                ServerDescriptor::deserialize(value)
                    .map(|descriptor| (name.clone(), descriptor))
                    .map_err(|err| {
                        McpConfigError::validation(
                            &self.path,
                            format!("{}.{name}", self.section_key),
                            err.to_string(),
                        )
                    })
            })
            .collect()
    }

    /// Rebuilds the whole top-level object, section included.
    #[must_use]
    pub fn document(&self) -> Map<String, Value> {
        self.clone().into_document()
    }

    /// [`Self::document`] as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.document())
    }

    /// Consumes the document, returning the server map.
    #[must_use]
    pub fn into_servers(self) -> Map<String, Value> {
        self.servers
    }

    /// Consumes the document, returning the whole top-level object.
    #[must_use]
    pub fn into_document(self) -> Map<String, Value> {
        let mut document = self.rest;
        document.insert(self.section_key, Value::Object(self.servers));
        document
    }
}
