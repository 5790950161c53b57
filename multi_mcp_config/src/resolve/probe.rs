//! Filesystem probing for candidate paths.

use std::fmt;
use std::io;
use std::path::Path;

use super::candidates::Candidate;

/// What a probe found at a candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A regular file exists at the path.
    Found,
    /// Nothing exists at the path.
    Missing,
    /// Something exists at the path but it is not a regular file.
    NotAFile,
    /// The path could not be inspected, e.g. permission denied on a parent.
    Inaccessible(String),
}

impl ProbeOutcome {
    /// Returns `true` for [`ProbeOutcome::Found`].
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found => f.write_str("found"),
            Self::Missing => f.write_str("not found"),
            Self::NotAFile => f.write_str("not a regular file"),
            Self::Inaccessible(reason) => write!(f, "inaccessible: {reason}"),
        }
    }
}

/// Checks whether a candidate path holds a regular file.
///
/// Implemented for any `Fn(&Path) -> ProbeOutcome`, so tests can describe a
/// filesystem with a closure.
pub trait Probe {
    /// Inspects `path` without reading it.
    fn probe(&self, path: &Path) -> ProbeOutcome;
}

impl<F> Probe for F
where
    F: Fn(&Path) -> ProbeOutcome,
{
    fn probe(&self, path: &Path) -> ProbeOutcome {
        self(path)
    }
}

/// Probes the real filesystem, following symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn probe(&self, path: &Path) -> ProbeOutcome {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => ProbeOutcome::Found,
            Ok(_) => ProbeOutcome::NotAFile,
            Err(err) if err.kind() == io::ErrorKind::NotFound => ProbeOutcome::Missing,
            Err(err) => ProbeOutcome::Inaccessible(err.to_string()),
        }
    }
}

/// A single probe of a candidate, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// The candidate that was probed.
    pub candidate: Candidate,
    /// What the probe found.
    pub outcome: ProbeOutcome,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.candidate.path.display(),
            self.candidate.origin,
            self.outcome
        )
    }
}
