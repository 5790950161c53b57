//! Test helpers shared across crates in the workspace.
//!
//! - [`env`]: RAII guards for environment variables such as `HOME`.
//! - [`cwd`]: an RAII guard for the process working directory.
//! - [`documents`]: builders and writers for `mcpServers` documents.

pub mod cwd;
pub mod documents;
pub mod env;
