//! Configuration path resolution.
//!
//! [`PathResolver`] turns a user-supplied path string into the absolute path
//! of an existing configuration file:
//!
//! 1. a leading `~` is expanded to the home directory;
//! 2. relative paths are joined onto the working directory;
//! 3. the result is returned if it is a regular file;
//! 4. otherwise, and only when the working directory looks like a package
//!    store (see [`StoreDetector`]), `~/<file name>` and then
//!    `~/.config/<app>/<file name>` are tried;
//! 5. if nothing matches, [`McpConfigError::NotFound`] lists every attempt.
//!
//! The pieces are split so each can be replaced in tests:
//! - `candidates`: pure candidate generation
//! - `env`: working and home directory access
//! - `probe`: filesystem existence checks
//! - `store`: package-store detection

mod builder;
mod candidates;
mod env;
mod probe;
mod store;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::Utf8Path;
use tracing::{debug, info};

pub use builder::PathResolverBuilder;
pub use candidates::{Candidate, CandidateContext, CandidateOrigin, candidates, expand_tilde};
pub use env::{Environment, FixedEnvironment, SystemEnvironment};
pub use probe::{Attempt, Probe, ProbeOutcome, SystemProbe};
pub use store::{DEFAULT_STORE_MARKER, NeverStore, StoreDetector, StoreMarkers};

use crate::{ConfigResult, McpConfigError};

/// Resolves configuration path strings to existing files.
///
/// Resolvers hold no mutable state; one instance can serve any number of
/// calls, and each call observes the environment afresh.
#[derive(Clone)]
pub struct PathResolver {
    app_name: String,
    detector: Arc<dyn StoreDetector + Send + Sync>,
    environment: Arc<dyn Environment + Send + Sync>,
    probe: Arc<dyn Probe + Send + Sync>,
}

impl PathResolver {
    /// Creates a builder initialised for `app_name`.
    #[must_use]
    pub fn builder(app_name: impl Into<String>) -> PathResolverBuilder {
        PathResolverBuilder::new(app_name)
    }

    /// Application name used for the `~/.config/<app>` fallback.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the ordered candidates for `raw` without probing them.
    ///
    /// # Errors
    ///
    /// Returns [`McpConfigError::CurrentDir`] when `raw` is relative and the
    /// working directory cannot be determined.
    pub fn candidates(&self, raw: &str) -> ConfigResult<Vec<Candidate>> {
        let home = self.environment.home_dir();
        let cwd = match self.environment.current_dir() {
            Ok(dir) => Some(dir),
            Err(source) if !expand_tilde(raw, home.as_deref()).is_absolute() => {
                return Err(McpConfigError::CurrentDir {
                    raw: raw.to_owned(),
                    source,
                });
            }
            Err(err) => {
                debug!(error = %err, "working directory unavailable; treating it as non-store");
                None
            }
        };
        let is_store_path = cwd
            .as_deref()
            .is_some_and(|dir| self.detector.is_store_path(dir));
        if !is_store_path {
            debug!(cwd = ?cwd, "working directory is not a package store; fallbacks disabled");
        }
        let context = CandidateContext {
            cwd: cwd.as_deref(),
            home: home.as_deref(),
            app_name: &self.app_name,
            is_store_path,
        };
        Ok(candidates(raw, &context))
    }

    /// Resolves `raw` to an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns [`McpConfigError::NotFound`] listing every probed candidate
    /// when none holds a regular file, or [`McpConfigError::CurrentDir`] when
    /// a relative path cannot be anchored.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use multi_mcp_config::resolve::PathResolver;
    ///
    /// let resolved = PathResolver::default().resolve("~/mcp.json")?;
    /// println!("using {}", resolved.path().display());
    /// # Ok::<(), multi_mcp_config::McpConfigError>(())
    /// ```
    pub fn resolve(&self, raw: &str) -> ConfigResult<ResolvedPath> {
        let candidates = self.candidates(raw)?;
        let mut attempts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate.origin.is_fallback() && attempts.len() == 1 {
                info!(raw, "primary configuration path missing; trying home directory fallbacks");
            }
            let outcome = self.probe.probe(&candidate.path);
            debug!(
                path = %candidate.path.display(),
                origin = %candidate.origin,
                outcome = %outcome,
                "probed configuration candidate"
            );
            let is_found = outcome.is_found();
            attempts.push(Attempt {
                candidate: candidate.clone(),
                outcome,
            });
            if is_found {
                if candidate.origin.is_fallback() {
                    info!(
                        raw,
                        path = %candidate.path.display(),
                        origin = %candidate.origin,
                        "using fallback configuration"
                    );
                }
                return Ok(ResolvedPath {
                    path: candidate.path,
                    origin: candidate.origin,
                    attempts,
                });
            }
        }
        Err(McpConfigError::NotFound {
            raw: raw.to_owned(),
            attempts,
        })
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        PathResolverBuilder::default().build()
    }
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("app_name", &self.app_name)
            .finish_non_exhaustive()
    }
}

/// An absolute path that referenced a regular file when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    origin: CandidateOrigin,
    attempts: Vec<Attempt>,
}

impl ResolvedPath {
    /// The resolved file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Which candidate produced the path.
    #[must_use]
    pub const fn origin(&self) -> CandidateOrigin {
        self.origin
    }

    /// Every candidate probed, ending with the one that matched.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Returns the path as UTF-8, if it is representable.
    #[must_use]
    pub fn utf8_path(&self) -> Option<&Utf8Path> {
        Utf8Path::from_path(&self.path)
    }

    /// Consumes the value, returning the path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
