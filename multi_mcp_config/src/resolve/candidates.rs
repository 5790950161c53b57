//! Pure candidate-path generation.
//!
//! Nothing here touches the filesystem; [`candidates`] is a function of the
//! raw path and a [`CandidateContext`] snapshot of the environment.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a candidate path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateOrigin {
    /// The path as supplied, tilde-expanded and anchored to the working
    /// directory.
    Primary,
    /// `<home>/<file name>`, consulted from a package-store working directory.
    HomeDirectory,
    /// `<home>/.config/<app>/<file name>`, consulted after
    /// [`Self::HomeDirectory`].
    AppConfigDirectory,
}

impl CandidateOrigin {
    /// Returns `true` for the fallback origins.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Primary)
    }

    /// Returns a short lowercase label for the origin.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::HomeDirectory => "home directory",
            Self::AppConfigDirectory => "application config directory",
        }
    }
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location to probe for the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path to probe.
    pub path: PathBuf,
    /// Why this path is a candidate.
    pub origin: CandidateOrigin,
}

/// Environment snapshot consumed by [`candidates`].
#[derive(Debug, Clone, Copy)]
pub struct CandidateContext<'a> {
    /// Working directory relative paths are joined onto. When absent, a
    /// relative path yields no primary candidate.
    pub cwd: Option<&'a Path>,
    /// Home directory used for tilde expansion and fallbacks.
    pub home: Option<&'a Path>,
    /// Directory name under `~/.config` for the second fallback.
    pub app_name: &'a str,
    /// Whether the working directory looks like a package store; fallbacks
    /// are generated only when set.
    pub is_store_path: bool,
}

/// Expands a leading `~` to `home`.
///
/// Only a bare `~` or `~` followed by a separator is expanded; `~user`
/// forms and paths without a known home directory are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use multi_mcp_config::resolve::expand_tilde;
///
/// let home = Path::new("/home/ada");
/// assert_eq!(expand_tilde("~/mcp.json", Some(home)), PathBuf::from("/home/ada/mcp.json"));
/// assert_eq!(expand_tilde("~bob/mcp.json", Some(home)), PathBuf::from("~bob/mcp.json"));
/// ```
#[must_use]
pub fn expand_tilde(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home_dir) = home else {
        return PathBuf::from(raw);
    };
    if raw == "~" {
        return home_dir.to_path_buf();
    }
    let rest = raw
        .strip_prefix("~/")
        .or_else(|| cfg!(windows).then(|| raw.strip_prefix("~\\")).flatten());
    match rest {
        Some(tail) => home_dir.join(tail.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}

/// Returns the ordered, deduplicated candidates for `raw`.
///
/// The primary candidate always comes first. When
/// [`CandidateContext::is_store_path`] is set and a home directory is known,
/// `<home>/<file name>` and `<home>/.config/<app>/<file name>` follow, in
/// that order. A candidate equal to an earlier one is dropped.
///
/// # Examples
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use multi_mcp_config::resolve::{CandidateContext, CandidateOrigin, candidates};
///
/// let context = CandidateContext {
///     cwd: Some(Path::new("/nix/store/abc-multi-mcp")),
///     home: Some(Path::new("/home/ada")),
///     app_name: "multi-mcp",
///     is_store_path: true,
/// };
/// let paths: Vec<PathBuf> = candidates("mcp.json", &context)
///     .into_iter()
///     .map(|candidate| candidate.path)
///     .collect();
/// assert_eq!(paths, [
///     PathBuf::from("/nix/store/abc-multi-mcp/mcp.json"),
///     PathBuf::from("/home/ada/mcp.json"),
///     PathBuf::from("/home/ada/.config/multi-mcp/mcp.json"),
/// ]);
/// ```
#[must_use]
pub fn candidates(raw: &str, context: &CandidateContext<'_>) -> Vec<Candidate> {
    let mut list = CandidateList::default();
    let expanded = expand_tilde(raw, context.home);

    if expanded.is_absolute() {
        list.push(expanded.clone(), CandidateOrigin::Primary);
    } else if let Some(cwd) = context.cwd {
        list.push(cwd.join(&expanded), CandidateOrigin::Primary);
    }

    if !context.is_store_path {
        return list.into_inner();
    }
    if let (Some(home), Some(file_name)) = (context.home, expanded.file_name()) {
        list.push(home.join(file_name), CandidateOrigin::HomeDirectory);
        let config_dir = home.join(".config");
        let nested = if context.app_name.is_empty() {
            config_dir
        } else {
            config_dir.join(context.app_name)
        };
        list.push(nested.join(file_name), CandidateOrigin::AppConfigDirectory);
    }
    list.into_inner()
}

#[derive(Default)]
struct CandidateList {
    candidates: Vec<Candidate>,
    seen: HashSet<String>,
}

impl CandidateList {
    fn push(&mut self, path: PathBuf, origin: CandidateOrigin) {
        if path.as_os_str().is_empty() {
            return;
        }
        if self.seen.insert(normalised_key(&path)) {
            self.candidates.push(Candidate { path, origin });
        }
    }

    fn into_inner(self) -> Vec<Candidate> {
        self.candidates
    }
}

#[cfg(windows)]
fn normalised_key(path: &Path) -> String {
    let lowercased = path.to_string_lossy().to_lowercase();
    lowercased.replace('/', "\\")
}

#[cfg(not(windows))]
fn normalised_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
