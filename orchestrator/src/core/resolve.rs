//! Wrapper resolution for (agent, step, variant) triples.
//!
//! Each agent keeps its wrappers under `<wrappers_dir>/<agent>/`, one file
//! per step: `<step>.sh` (shell variant) and `<step>.ps1` (native variant).
//! Resolution is pure over the [`WrapperQuery`] trait so it can be tested
//! without touching a real filesystem; [`DiskQuery`] is the production
//! implementation.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::core::registry::Step;
use crate::error::WrapperNotFound;

/// Which execution flavor of a wrapper to prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum Variant {
    /// POSIX shell script, assumed universally available; always the
    /// fallback when the preferred candidate is missing.
    Shell,
    /// Platform-native script (PowerShell), launched through `pwsh`.
    Native,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Shell => f.write_str("shell"),
            Variant::Native => f.write_str("native"),
        }
    }
}

/// Filesystem queries used during resolution, injectable for tests.
pub trait WrapperQuery {
    fn is_file(&self, path: &Path) -> bool;
    fn is_executable(&self, path: &Path) -> bool;
}

/// The concrete wrapper chosen for one step, with the variant actually
/// matched (may differ from the request's preference due to fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWrapper {
    pub path: PathBuf,
    pub variant: Variant,
}

/// Locate the wrapper executable for `(agent, step)`.
///
/// Order: the preferred candidate first (shell must be executable, native
/// only needs to exist as a file), then the shell candidate as fallback,
/// then [`WrapperNotFound`].
pub fn resolve<Q: WrapperQuery>(
    query: &Q,
    wrappers_dir: &Path,
    agent: &str,
    step: Step,
    preference: Variant,
) -> Result<ResolvedWrapper, WrapperNotFound> {
    let agent_dir = wrappers_dir.join(agent);
    let shell = agent_dir.join(format!("{step}.sh"));
    let native = agent_dir.join(format!("{step}.ps1"));

    if preference == Variant::Native && query.is_file(&native) {
        return Ok(ResolvedWrapper {
            path: native,
            variant: Variant::Native,
        });
    }
    if query.is_executable(&shell) {
        return Ok(ResolvedWrapper {
            path: shell,
            variant: Variant::Shell,
        });
    }
    Err(WrapperNotFound {
        agent: agent.to_string(),
        step,
    })
}

/// Production [`WrapperQuery`] backed by real filesystem metadata.
pub struct DiskQuery;

impl WrapperQuery for DiskQuery {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
    }
}
