//! Success reports printed by `multi-mcp-config-check`.

use std::collections::BTreeMap;
use std::io::Write;

use multi_mcp_config::{ConfigDocument, ResolvedPath};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CheckError;

/// One server entry as shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSummary {
    /// Executable to launch.
    pub command: String,
    /// Arguments passed to the command.
    pub args: Vec<String>,
}

/// Outcome of a successful resolve-and-load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Absolute path of the loaded file.
    pub path: String,
    /// Label of the candidate that matched.
    pub origin: &'static str,
    /// Servers keyed by name.
    pub servers: BTreeMap<String, ServerSummary>,
}

impl Report {
    /// Builds a report from a loaded document.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Config`] if any server entry is malformed.
    pub fn new(resolved: &ResolvedPath, document: &ConfigDocument) -> Result<Self, CheckError> {
        let servers = document
            .server_descriptors()?
            .into_iter()
            .map(|(name, descriptor)| {
                let summary = ServerSummary {
                    command: descriptor.command,
                    args: descriptor.args,
                };
                (name, summary)
            })
            .collect();
        Ok(Self {
            path: resolved.path().display().to_string(),
            origin: resolved.origin().as_str(),
            servers,
        })
    }

    /// Writes the report to `out` in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn write(&self, format: OutputFormat, out: &mut impl Write) -> Result<(), CheckError> {
        match format {
            OutputFormat::Text => self.write_text(out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "config: {} ({})", self.path, self.origin)?;
        if self.servers.is_empty() {
            return writeln!(out, "servers: none");
        }
        writeln!(out, "servers ({}):", self.servers.len())?;
        for (name, server) in &self.servers {
            if server.args.is_empty() {
                writeln!(out, "  {name}: {}", server.command)?;
            } else {
                writeln!(out, "  {name}: {} {}", server.command, server.args.join(" "))?;
            }
        }
        Ok(())
    }
}
