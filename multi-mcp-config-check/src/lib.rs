//! Library interface for `multi-mcp-config-check`.
//!
//! The binary resolves a configuration path the way the multi-mcp launcher
//! does, loads the file, and prints where it was found and which servers it
//! declares. Failures exit with a code per error kind; see
//! [`CheckError::exit_code`].

pub mod cli;
pub mod error;
pub mod logging;
pub mod report;

use std::io::Write;

use tracing::info;

pub use crate::cli::{Args, OutputFormat};
pub use crate::error::CheckError;
pub use crate::report::Report;

/// Resolves, loads and reports the configuration named by `args`.
///
/// # Errors
///
/// Returns [`CheckError::Config`] when resolution or loading fails and an
/// output error when the report cannot be written.
pub fn run(args: &Args, out: &mut impl Write) -> Result<Report, CheckError> {
    let resolved = args.resolver().resolve(&args.config)?;
    let document = args.loader().load(&resolved)?;
    let report = Report::new(&resolved, &document)?;
    info!(
        path = %report.path,
        origin = report.origin,
        servers = report.servers.len(),
        "configuration is valid"
    );
    report.write(args.format, out)?;
    Ok(report)
}
