//! Run controller: validates the request, prepares the environment, then
//! executes the selected steps in order with fail-fast gating.
//!
//! States: Idle → Validating-Config → Preparing-Env → Running-Steps →
//! Done | Failed. The first resolution, execution, or validation failure
//! halts the run; re-running with `--from <step>` after remediation is the
//! user's responsibility.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::registry::Pipeline;
use crate::core::resolve::{WrapperQuery, resolve};
use crate::core::select::select_steps;
use crate::io::config::{OrchestratorConfig, load_config};
use crate::io::env::prepare_env;
use crate::io::executor::{ExecRequest, StepExecutor};
use crate::io::validate::validate_artifact;
use crate::request::RunRequest;

/// Aggregate result of one invocation. Success means every selected step
/// exited zero and passed artifact validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub steps_executed: usize,
}

/// Execute the pipeline described by `request` against `repo_root`.
///
/// Generic over the wrapper query and step executor so tests can script
/// both without a real filesystem or child processes.
pub fn run_pipeline<Q: WrapperQuery, E: StepExecutor>(
    repo_root: &Path,
    request: &RunRequest,
    query: &Q,
    executor: &E,
) -> Result<RunOutcome> {
    // Validating-Config: no side effects before this passes.
    request.validate()?;
    let cfg = load_config(&repo_root.join(".orchestrator").join("config.toml"))?;

    let selection = select_steps(request.pipeline.steps(), request.from, request.only);
    if selection.is_empty() {
        warn!("selection is empty, nothing to run");
        eprintln!("no steps selected; nothing to do");
        return Ok(RunOutcome { steps_executed: 0 });
    }

    // Preparing-Env.
    let env_overrides = prepare_env(&request.agent);
    if request.pipeline == Pipeline::Blitz {
        warn_if_blitz_preconditions_missing(repo_root, request, &cfg);
    }

    eprintln!(
        "running {} step(s) of the {} pipeline for feature '{}' with agent '{}'",
        selection.len(),
        request.pipeline,
        request.feature,
        request.agent
    );

    // Running-Steps: resolve, execute, validate, fail fast.
    let wrappers_dir = repo_root.join(&cfg.wrappers_dir);
    let logs_dir = repo_root.join(&cfg.logs_dir);
    let mut steps_executed = 0;
    for step in selection {
        let wrapper = resolve(query, &wrappers_dir, &request.agent, step, request.variant)?;
        debug!(step = %step, path = %wrapper.path.display(), "resolved wrapper");

        let outcome = executor.execute(&ExecRequest {
            agent: &request.agent,
            feature: &request.feature,
            step,
            wrapper,
            repo_root,
            logs_dir: &logs_dir,
            env_overrides: &env_overrides,
            dry_run: request.dry_run,
        })?;

        // Dry runs invoke nothing, so there is no artifact to check.
        if !request.dry_run {
            validate_artifact(repo_root, step, &request.feature, &cfg)?;
        }
        info!(step = %step, exit_code = outcome.exit_code, "step done");
        steps_executed += 1;
    }

    eprintln!(
        "completed {} step(s) for feature '{}' (agent '{}')",
        steps_executed, request.feature, request.agent
    );
    Ok(RunOutcome { steps_executed })
}

/// Blitz assumes constitution and specify already ran; hint when the
/// feature's spec is nowhere to be found. A hint only, never an error.
fn warn_if_blitz_preconditions_missing(
    repo_root: &Path,
    request: &RunRequest,
    cfg: &OrchestratorConfig,
) {
    let spec = repo_root
        .join(cfg.feature_dir(&request.feature))
        .join("spec.md");
    if !spec.is_file() {
        warn!(path = %spec.display(), "blitz pipeline but no spec.md found for feature");
        eprintln!(
            "warning: blitz pipeline assumes earlier stages ran, but {} is missing",
            spec.display()
        );
    }
}
