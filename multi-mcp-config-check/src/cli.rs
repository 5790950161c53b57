//! Command-line interface definitions for `multi-mcp-config-check`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueEnum};
use multi_mcp_config::{
    ConfigLoader, DEFAULT_APP_NAME, DEFAULT_SECTION_KEY, DuplicateKeys, PathResolver,
};

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_ENV: &str = "MULTI_MCP_CONFIG";

/// Report formats supported by `multi-mcp-config-check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// A single JSON object with `path`, `origin` and `servers`.
    Json,
}

impl OutputFormat {
    /// Returns the CLI-friendly string for this output format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Parsed CLI arguments for `multi-mcp-config-check`.
#[derive(Debug, Parser)]
#[command(name = "multi-mcp-config-check")]
#[command(about = "Resolve and validate a multi-mcp configuration file")]
#[command(version)]
pub struct Args {
    /// Configuration path: absolute, relative to the working directory, or
    /// starting with `~/`.
    #[arg(long, env = CONFIG_ENV, default_value = "mcp.json", value_name = "path")]
    pub config: String,
    /// Application name used for the `~/.config/<app>` fallback.
    #[arg(long, default_value = DEFAULT_APP_NAME, value_name = "name")]
    pub app_name: String,
    /// Path segments marking a package store, matched anywhere in the
    /// working directory (repeat for several; defaults to `/nix/store`).
    #[arg(long = "store-marker", value_name = "path")]
    pub store_markers: Vec<Utf8PathBuf>,
    /// Top-level key holding the server map.
    #[arg(long, default_value = DEFAULT_SECTION_KEY, value_name = "key")]
    pub section_key: String,
    /// Accept duplicate keys, keeping the last occurrence.
    #[arg(long = "allow-duplicates")]
    pub should_allow_duplicates: bool,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Increase log verbosity (repeatable); `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the resolver described by the arguments.
    #[must_use]
    pub fn resolver(&self) -> PathResolver {
        let builder = PathResolver::builder(self.app_name.as_str());
        if self.store_markers.is_empty() {
            builder.build()
        } else {
            builder
                .store_markers(self.store_markers.iter().map(|marker| marker.as_std_path()))
                .build()
        }
    }

    /// Builds the loader described by the arguments.
    #[must_use]
    pub fn loader(&self) -> ConfigLoader {
        let policy = if self.should_allow_duplicates {
            DuplicateKeys::LastWins
        } else {
            DuplicateKeys::Reject
        };
        ConfigLoader::new()
            .section_key(self.section_key.as_str())
            .duplicate_keys(policy)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use clap::Parser;
    use multi_mcp_config::{ConfigLoader, DuplicateKeys, PathResolver};
    use rstest::rstest;
    use serial_test::serial;

    use super::{Args, CONFIG_ENV, OutputFormat};

    fn parse(args: &[&str]) -> Result<Args> {
        let argv = std::iter::once("multi-mcp-config-check").chain(args.iter().copied());
        Ok(Args::try_parse_from(argv)?)
    }

    #[rstest]
    #[serial]
    fn defaults_match_library_defaults() -> Result<()> {
        let _env = test_helpers::env::remove_var(CONFIG_ENV);
        let args = parse(&[])?;
        ensure!(args.config == "mcp.json");
        ensure!(args.app_name == "multi-mcp");
        ensure!(args.section_key == "mcpServers");
        ensure!(args.store_markers.is_empty());
        ensure!(args.format == OutputFormat::Text);
        ensure!(args.verbose == 0);
        ensure!(args.loader() == ConfigLoader::default());
        ensure!(args.resolver().app_name() == PathResolver::default().app_name());
        Ok(())
    }

    #[rstest]
    #[serial]
    fn config_falls_back_to_environment() -> Result<()> {
        let _env = test_helpers::env::set_var(CONFIG_ENV, "/etc/multi-mcp/servers.json");
        ensure!(parse(&[])?.config == "/etc/multi-mcp/servers.json");
        ensure!(parse(&["--config", "other.json"])?.config == "other.json");
        Ok(())
    }

    #[rstest]
    #[serial]
    fn options_are_forwarded() -> Result<()> {
        let _env = test_helpers::env::remove_var(CONFIG_ENV);
        let args = parse(&[
            "--app-name",
            "tool",
            "--store-marker",
            "/gnu/store",
            "--store-marker",
            "/opt/store",
            "--section-key",
            "servers",
            "--allow-duplicates",
            "--format",
            "json",
            "-vv",
        ])?;
        ensure!(args.resolver().app_name() == "tool");
        ensure!(args.store_markers.len() == 2);
        ensure!(args.format.as_str() == "json");
        ensure!(args.verbose == 2);
        let expected = ConfigLoader::new()
            .section_key("servers")
            .duplicate_keys(DuplicateKeys::LastWins);
        ensure!(args.loader() == expected);
        Ok(())
    }

    #[rstest]
    fn unknown_format_is_rejected() {
        assert!(parse(&["--format", "yaml"]).is_err());
    }
}
