//! Configuration path resolution and loading for the multi-mcp launcher.
//!
//! The launcher starts named MCP servers described by a JSON file. The file
//! path comes from the user, but the process may not run in the user's
//! directory: `nix run` and similar launchers start it inside a read-only
//! store. This crate turns the user's path string into the right file and
//! loads it.
//!
//! - [`PathResolver`] produces ordered candidates and returns the first
//!   regular file, falling back to the home directory only when the working
//!   directory looks like a package store.
//! - [`ConfigLoader`] reads, parses and validates the file.
//! - [`McpConfigError`] keeps not-found, read, parse and validation failures
//!   distinct so callers can print targeted guidance.
//!
//! # Examples
//!
//! ```rust,no_run
//! # fn main() -> Result<(), multi_mcp_config::McpConfigError> {
//! let document = multi_mcp_config::load_mcp_config("mcp.json")?;
//! for (name, descriptor) in document.server_descriptors()? {
//!     println!("{name}: {} {:?}", descriptor.command, descriptor.args);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod load;
pub mod resolve;

pub use error::{ConfigResult, ErrorKind, McpConfigError};
pub use load::{ConfigDocument, ConfigLoader, DuplicateKeys, ServerDescriptor};
pub use resolve::{PathResolver, PathResolverBuilder, ResolvedPath};

/// Application name used for the `~/.config/<app>` fallback.
pub const DEFAULT_APP_NAME: &str = "multi-mcp";

/// Top-level key holding the server map.
pub const DEFAULT_SECTION_KEY: &str = "mcpServers";

/// Resolves `raw` with the default [`PathResolver`] and loads it with the
/// default [`ConfigLoader`].
///
/// Each call resolves and loads afresh; nothing is cached between calls, so a
/// failed call can simply be retried.
///
/// # Errors
///
/// Returns any resolution or loading error; see [`McpConfigError`].
pub fn load_mcp_config(raw: &str) -> ConfigResult<ConfigDocument> {
    let resolved = PathResolver::default().resolve(raw)?;
    ConfigLoader::default().load(&resolved)
}
