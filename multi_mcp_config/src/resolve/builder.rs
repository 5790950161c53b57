//! Builder for [`PathResolver`].
//!
//! The builder lets applications choose the application name used for the
//! `~/.config/<app>` fallback, the store markers that switch fallbacks on,
//! and the environment and filesystem seams.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::env::{Environment, SystemEnvironment};
use super::probe::{Probe, SystemProbe};
use super::store::{StoreDetector, StoreMarkers};
use super::PathResolver;
use crate::DEFAULT_APP_NAME;

/// Builder for [`PathResolver`].
///
/// # Examples
///
/// ```rust
/// use multi_mcp_config::resolve::{FixedEnvironment, PathResolver};
///
/// let resolver = PathResolver::builder("multi-mcp")
///     .store_marker("/gnu/store")
///     .environment(FixedEnvironment::new("/gnu/store/abc-multi-mcp").with_home("/home/ada"))
///     .build();
/// let candidates = resolver.candidates("mcp.json")?;
/// assert_eq!(candidates.len(), 3);
/// # Ok::<(), multi_mcp_config::McpConfigError>(())
/// ```
#[derive(Clone)]
pub struct PathResolverBuilder {
    app_name: String,
    markers: Option<Vec<PathBuf>>,
    detector: Option<Arc<dyn StoreDetector + Send + Sync>>,
    environment: Option<Arc<dyn Environment + Send + Sync>>,
    probe: Option<Arc<dyn Probe + Send + Sync>>,
}

impl PathResolverBuilder {
    /// Creates a builder for `app_name`.
    ///
    /// `app_name` names the directory probed under `~/.config`.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            markers: None,
            detector: None,
            environment: None,
            probe: None,
        }
    }

    /// Adds a store marker on top of any configured so far.
    ///
    /// The first call replaces the default `/nix/store` marker.
    #[must_use]
    pub fn store_marker(mut self, marker: impl Into<PathBuf>) -> Self {
        self.markers.get_or_insert_with(Vec::new).push(marker.into());
        self
    }

    /// Replaces the store markers.
    ///
    /// An empty iterator disables fallback.
    #[must_use]
    pub fn store_markers<I, P>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces marker matching with a custom detector.
    ///
    /// Takes precedence over [`Self::store_marker`] and
    /// [`Self::store_markers`].
    #[must_use]
    pub fn store_detector(mut self, detector: impl StoreDetector + Send + Sync + 'static) -> Self {
        self.detector = Some(Arc::new(detector));
        self
    }

    /// Sets the source of the working and home directories.
    #[must_use]
    pub fn environment(mut self, environment: impl Environment + Send + Sync + 'static) -> Self {
        self.environment = Some(Arc::new(environment));
        self
    }

    /// Sets the filesystem probe.
    #[must_use]
    pub fn probe(mut self, probe: impl Probe + Send + Sync + 'static) -> Self {
        self.probe = Some(Arc::new(probe));
        self
    }

    /// Finalises the builder.
    #[must_use]
    pub fn build(self) -> PathResolver {
        let detector: Arc<dyn StoreDetector + Send + Sync> = match (self.detector, self.markers) {
            (Some(detector), _) => detector,
            (None, Some(markers)) => Arc::new(StoreMarkers::new(markers)),
            (None, None) => Arc::new(StoreMarkers::default()),
        };
        let environment: Arc<dyn Environment + Send + Sync> = self
            .environment
            .unwrap_or_else(|| Arc::new(SystemEnvironment));
        let probe: Arc<dyn Probe + Send + Sync> =
            self.probe.unwrap_or_else(|| Arc::new(SystemProbe));
        PathResolver {
            app_name: self.app_name,
            detector,
            environment,
            probe,
        }
    }
}

impl Default for PathResolverBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

impl fmt::Debug for PathResolverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolverBuilder")
            .field("app_name", &self.app_name)
            .field("markers", &self.markers)
            .field("has_custom_detector", &self.detector.is_some())
            .finish_non_exhaustive()
    }
}
