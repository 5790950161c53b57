//! Error types produced while resolving and loading configuration.

mod kind;
mod types;

pub use kind::ErrorKind;
pub use types::{ConfigResult, McpConfigError};
