//! Builders and writers for configuration documents used in tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

/// Descriptor used for every generated server entry.
#[must_use]
pub fn echo_server(arg: &str) -> Value {
    json!({ "command": "echo", "args": [arg] })
}

/// Builds `{ "mcpServers": { <name>: echo_server(name), ... } }`.
///
/// # Examples
///
/// ```
/// use test_helpers::documents;
///
/// let doc = documents::servers_document(&["test_server"]);
/// assert!(doc["mcpServers"]["test_server"].is_object());
/// ```
#[must_use]
pub fn servers_document(names: &[&str]) -> Value {
    let servers: Map<String, Value> = names
        .iter()
        .map(|name| ((*name).to_owned(), echo_server(name)))
        .collect();
    json!({ "mcpServers": servers })
}

/// Writes `document` as JSON to `root/relative`, creating parent
/// directories, and returns the full path.
///
/// # Errors
///
/// Returns an error if serialisation or any filesystem operation fails.
pub fn write_document(root: &Path, relative: impl AsRef<Path>, document: &Value) -> Result<PathBuf> {
    let text = serde_json::to_string_pretty(document).context("serialise document")?;
    write_text(root, relative, &text)
}

/// Writes raw `text` to `root/relative`, creating parent directories, and
/// returns the full path.
///
/// # Errors
///
/// Returns an error if any filesystem operation fails.
pub fn write_text(root: &Path, relative: impl AsRef<Path>, text: &str) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
