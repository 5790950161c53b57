//! Process environment access, injectable for testing.

use std::io;
use std::path::PathBuf;

/// Source of the working directory and home directory used during resolution.
pub trait Environment {
    /// Returns the directory relative paths are anchored to.
    ///
    /// # Errors
    ///
    /// Returns the operating system error when the directory is unavailable,
    /// for example because it was deleted.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Returns the current user's home directory, if one is known.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Reads the live process environment.
///
/// The home directory comes from `HOME`, then `USERPROFILE`, then the
/// platform lookup in [`dirs::home_dir`]. Empty variables are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|value| !value.is_empty())
            .or_else(|| std::env::var_os("USERPROFILE").filter(|value| !value.is_empty()))
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
    }
}

/// Environment with a caller-supplied working and home directory.
///
/// Useful when the launcher knows the user's shell directory through some
/// other channel, and in tests.
///
/// # Examples
///
/// ```rust
/// use multi_mcp_config::resolve::{Environment, FixedEnvironment};
///
/// let env = FixedEnvironment::new("/work").with_home("/home/ada");
/// assert_eq!(env.home_dir(), Some("/home/ada".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedEnvironment {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl FixedEnvironment {
    /// Creates an environment rooted at `cwd` with no home directory.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home: None,
        }
    }

    /// Sets the home directory.
    #[must_use]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Environment for FixedEnvironment {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}
