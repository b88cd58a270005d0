//! Step executor: turns a resolved wrapper into a child process run.
//!
//! The [`StepExecutor`] trait decouples the run controller from real process
//! execution. Tests use scripted executors that record invocations without
//! spawning anything.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::core::command::{render_command, wrapper_command};
use crate::core::registry::Step;
use crate::core::resolve::ResolvedWrapper;
use crate::error::StepFailed;
use crate::io::logs::{ensure_log_dir, step_log_path};
use crate::io::process::run_teeing;

/// Parameters for one step execution.
#[derive(Debug, Clone)]
pub struct ExecRequest<'a> {
    pub agent: &'a str,
    pub feature: &'a str,
    pub step: Step,
    pub wrapper: ResolvedWrapper,
    /// Repository root passed to the wrapper and used as its working dir.
    pub repo_root: &'a Path,
    /// Absolute log directory for this run.
    pub logs_dir: &'a Path,
    /// Environment overrides applied to the child.
    pub env_overrides: &'a [(String, String)],
    /// Render the command instead of running it.
    pub dry_run: bool,
}

/// Per-step result, consumed immediately by the run controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub exit_code: i32,
    /// `None` for dry runs, which create no log file.
    pub log_path: Option<PathBuf>,
}

/// Abstraction over step execution backends.
pub trait StepExecutor {
    /// Run one step to completion. A non-zero wrapper exit must surface as
    /// a [`StepFailed`] error.
    fn execute(&self, request: &ExecRequest<'_>) -> Result<StepOutcome>;
}

/// Executor that spawns the resolved wrapper as a child process.
pub struct WrapperExecutor;

impl StepExecutor for WrapperExecutor {
    #[instrument(skip_all, fields(step = %request.step, dry_run = request.dry_run))]
    fn execute(&self, request: &ExecRequest<'_>) -> Result<StepOutcome> {
        let argv = wrapper_command(&request.wrapper, request.feature, request.repo_root);

        if request.dry_run {
            println!("{}", render_command(&argv));
            return Ok(StepOutcome {
                step: request.step,
                exit_code: 0,
                log_path: None,
            });
        }

        ensure_log_dir(request.logs_dir)?;
        let log_path = step_log_path(request.logs_dir, request.agent, request.feature, request.step);
        eprintln!(
            "==> {} [{}] (log: {})",
            request.step,
            request.agent,
            log_path.display()
        );

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]).current_dir(request.repo_root);
        for (key, value) in request.env_overrides {
            cmd.env(key, value);
        }

        info!(command = %render_command(&argv), "executing wrapper");
        let status = run_teeing(cmd, &log_path)?;
        let exit_code = status.code().unwrap_or(1);

        if !status.success() {
            return Err(StepFailed {
                agent: request.agent.to_string(),
                step: request.step,
                code: exit_code,
                log_path,
            }
            .into());
        }

        debug!(exit_code, "step completed");
        Ok(StepOutcome {
            step: request.step,
            exit_code,
            log_path: Some(log_path),
        })
    }
}
