//! The immutable parameters of one orchestrator invocation.

use crate::core::registry::{Pipeline, Step};
use crate::core::resolve::Variant;
use crate::error::ConfigError;

/// Everything one run needs, built once from argument parsing and passed
/// explicitly; no component holds mutable run-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// External toolset whose wrappers implement the steps.
    pub agent: String,
    /// Unit-of-work identifier, shaped like a directory name.
    pub feature: String,
    /// Active step registry, chosen once for the entire run.
    pub pipeline: Pipeline,
    /// Start at this step and run through the end of the registry.
    pub from: Option<Step>,
    /// Run exactly this one step.
    pub only: Option<Step>,
    /// Render commands instead of executing them.
    pub dry_run: bool,
    /// Preferred wrapper flavor.
    pub variant: Variant,
}

impl RunRequest {
    /// Enforce the invariants the run controller requires before any side
    /// effect: `from`/`only` mutual exclusion, registry membership, and a
    /// directory-name-shaped feature.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_feature(&self.feature)?;
        if self.from.is_some() && self.only.is_some() {
            return Err(ConfigError::FromConflictsWithOnly);
        }
        for step in [self.from, self.only].into_iter().flatten() {
            if !self.pipeline.contains(step) {
                return Err(ConfigError::StepNotInPipeline {
                    step,
                    pipeline: self.pipeline,
                });
            }
        }
        Ok(())
    }
}

fn validate_feature(feature: &str) -> Result<(), ConfigError> {
    if feature.is_empty() {
        return Err(ConfigError::InvalidFeature {
            feature: feature.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if feature
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'))
    {
        return Err(ConfigError::InvalidFeature {
            feature: feature.to_string(),
            reason: "must be [A-Za-z0-9._-] only".to_string(),
        });
    }
    Ok(())
}
