//! Post-step artifact validation.
//!
//! Each step declares the file it must produce. "Valid" means the file
//! exists with non-zero size: an empty file signals the agent ran but
//! produced no usable content, so it fails identically to a missing one.
//! The implement step has no declared artifact; its output shape is
//! agent-defined and validation is a no-op.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::registry::Step;
use crate::error::MissingArtifact;
use crate::io::config::OrchestratorConfig;

/// The artifact `step` must produce, relative to the repo root. `None` for
/// steps without a declared artifact.
pub fn expected_artifact(
    step: Step,
    feature: &str,
    cfg: &OrchestratorConfig,
) -> Option<PathBuf> {
    match step {
        Step::Constitution => Some(cfg.memory_dir.join("constitution.md")),
        Step::Specify => Some(cfg.feature_dir(feature).join("spec.md")),
        Step::Plan => Some(cfg.feature_dir(feature).join("plan.md")),
        Step::Tasks => Some(cfg.feature_dir(feature).join("tasks.md")),
        Step::Implement => None,
    }
}

/// Check that the artifact for `step` exists under `repo_root` and is
/// non-empty.
pub fn validate_artifact(
    repo_root: &Path,
    step: Step,
    feature: &str,
    cfg: &OrchestratorConfig,
) -> Result<(), MissingArtifact> {
    let Some(relative) = expected_artifact(step, feature, cfg) else {
        return Ok(());
    };
    let path = repo_root.join(&relative);
    let usable = fs::metadata(&path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false);
    if usable {
        Ok(())
    } else {
        Err(MissingArtifact { step, path })
    }
}
