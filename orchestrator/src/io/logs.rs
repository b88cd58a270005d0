//! Log path allocation under the orchestrator log directory.
//!
//! Each step execution writes to its own uniquely timestamped file, so
//! concurrent runs never contend on a log.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::core::registry::Step;

/// Create the log directory if it does not exist yet. Safe to call on every
/// step.
pub fn ensure_log_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))
}

/// Allocate the log path for one step execution:
/// `<dir>/<YYYYMMDD-HHMMSS>-<agent>-<feature>-<step>.log` (UTC).
pub fn step_log_path(dir: &Path, agent: &str, feature: &str, step: Step) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("{stamp}-{agent}-{feature}-{step}.log"))
}
