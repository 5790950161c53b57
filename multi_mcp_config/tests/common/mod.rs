//! Filesystem sandbox shared by the integration tests.
//!
//! A sandbox is a temporary directory laid out as:
//!
//! ```text
//! <root>/home                          fake home directory
//! <root>/user                          the user's shell directory
//! <root>/nix/store/abc123-multi-mcp    a package-store working directory
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rstest::fixture;
use tempfile::TempDir;
use test_helpers::cwd::{self, CwdGuard};
use test_helpers::env::{self, EnvScope};

pub struct Sandbox {
    root: TempDir,
}

/// Keeps `HOME` and the working directory redirected; restores both on drop.
pub struct Session {
    _cwd: CwdGuard,
    _env: EnvScope,
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        let root = TempDir::new().context("create sandbox")?;
        let sandbox = Self { root };
        for dir in [sandbox.home(), sandbox.user_dir(), sandbox.store_dir()] {
            std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(sandbox)
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn user_dir(&self) -> PathBuf {
        self.root.path().join("user")
    }

    pub fn store_dir(&self) -> PathBuf {
        self.root.path().join("nix/store/abc123-multi-mcp")
    }

    /// Points `HOME` at the sandbox home and enters `dir`.
    pub fn enter(&self, dir: &Path) -> Result<Session> {
        let env_scope = env::home_scope(self.home());
        let cwd_guard = cwd::set_dir(dir)?;
        Ok(Session {
            _cwd: cwd_guard,
            _env: env_scope,
        })
    }
}

#[fixture]
pub fn sandbox() -> Sandbox {
    Sandbox::new().unwrap_or_else(|err| panic!("sandbox setup failed: {err:#}"))
}

/// Compares two paths after resolving symlinks such as macOS's `/var`.
pub fn same_file(left: &Path, right: &Path) -> Result<bool> {
    let left = std::fs::canonicalize(left).with_context(|| format!("canonicalise {}", left.display()))?;
    let right =
        std::fs::canonicalize(right).with_context(|| format!("canonicalise {}", right.display()))?;
    Ok(left == right)
}
