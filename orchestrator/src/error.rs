//! Typed failures for the run controller's taxonomy.
//!
//! All orchestration functions return `anyhow::Result`; these types are
//! embedded in the chain so callers can `downcast_ref` where the distinction
//! matters (the binary pulls [`StepFailed`] out to propagate the wrapper's
//! exit code).

use std::path::PathBuf;

use thiserror::Error;

use crate::core::registry::{Pipeline, Step};

/// Invalid invocation. The run must not start and has no side effects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--from and --only are mutually exclusive")]
    FromConflictsWithOnly,
    #[error("step '{step}' is not part of the {pipeline} pipeline")]
    StepNotInPipeline { step: Step, pipeline: Pipeline },
    #[error("invalid feature name '{feature}': {reason}")]
    InvalidFeature { feature: String, reason: String },
}

/// No usable wrapper executable for the requested (agent, step, variant).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no usable wrapper for agent '{agent}' step '{step}'")]
pub struct WrapperNotFound {
    pub agent: String,
    pub step: Step,
}

/// The wrapper process exited non-zero. `code` is the child's own exit code
/// (1 when the child was killed by a signal and no code is available).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("agent '{agent}' step '{step}' failed with exit code {code} (log: {})", log_path.display())]
pub struct StepFailed {
    pub agent: String,
    pub step: Step,
    pub code: i32,
    pub log_path: PathBuf,
}

/// The wrapper exited zero but its expected artifact is absent or empty.
/// Artifact presence is the real contract, so this is a step failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("step '{step}' produced no usable artifact: {} is missing or empty", path.display())]
pub struct MissingArtifact {
    pub step: Step,
    pub path: PathBuf,
}
