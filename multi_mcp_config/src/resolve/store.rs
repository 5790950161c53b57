//! Detection of package-store working directories.
//!
//! Launchers such as `nix run` start the program with its working directory
//! inside a read-only store. A relative configuration path typed by the user
//! then points into the store instead of their shell directory, so the
//! resolver only consults home-directory fallbacks when the working
//! directory looks like such a store.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Marker matched against the working directory by default.
pub const DEFAULT_STORE_MARKER: &str = "/nix/store";

/// Decides whether a working directory is a package-store location.
///
/// Implemented for any `Fn(&Path) -> bool`, so an alternative signal (an
/// environment variable, a fixed answer in tests) can be plugged in without
/// touching candidate generation.
pub trait StoreDetector {
    /// Returns `true` when `cwd` lies inside a package store.
    fn is_store_path(&self, cwd: &Path) -> bool;
}

impl<F> StoreDetector for F
where
    F: Fn(&Path) -> bool,
{
    fn is_store_path(&self, cwd: &Path) -> bool {
        self(cwd)
    }
}

/// Matches consecutive directory segments of the working directory against
/// one or more marker paths.
///
/// Matching is by whole segments, so `/nix/store/abc-pkg` matches the marker
/// `/nix/store` while `/home/nixstore` and `/nix/storefront` do not.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use multi_mcp_config::resolve::{StoreDetector, StoreMarkers};
///
/// let markers = StoreMarkers::default();
/// assert!(markers.is_store_path(Path::new("/nix/store/abc-multi-mcp/bin")));
/// assert!(!markers.is_store_path(Path::new("/home/ada/projects")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMarkers {
    markers: Vec<Vec<OsString>>,
}

impl StoreMarkers {
    /// Creates a detector for the given marker paths.
    ///
    /// Markers without any normal segment (such as `/` or an empty string)
    /// are ignored.
    #[must_use]
    pub fn new<I, P>(markers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let segments = markers
            .into_iter()
            .map(|marker| normal_segments(&marker.into()))
            .filter(|segments| !segments.is_empty())
            .collect();
        Self { markers: segments }
    }

    /// Returns `true` when no usable marker was configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for StoreMarkers {
    fn default() -> Self {
        Self::new([DEFAULT_STORE_MARKER])
    }
}

impl StoreDetector for StoreMarkers {
    fn is_store_path(&self, cwd: &Path) -> bool {
        let haystack = normal_segments(cwd);
        self.markers.iter().any(|marker| {
            haystack
                .windows(marker.len())
                .any(|window| window == marker.as_slice())
        })
    }
}

/// Disables fallback entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStore;

impl StoreDetector for NeverStore {
    fn is_store_path(&self, _cwd: &Path) -> bool {
        false
    }
}

fn normal_segments(path: &Path) -> Vec<OsString> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_os_string()),
            _ => None,
        })
        .collect()
}
