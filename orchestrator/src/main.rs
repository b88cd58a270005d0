//! Command-line entry point for the pipeline orchestrator.

use std::path::PathBuf;

use clap::Parser;

use orchestrator::core::registry::{Pipeline, Step};
use orchestrator::core::resolve::{DiskQuery, Variant};
use orchestrator::error::StepFailed;
use orchestrator::exit_codes;
use orchestrator::io::executor::WrapperExecutor;
use orchestrator::logging;
use orchestrator::request::RunRequest;
use orchestrator::run::run_pipeline;

#[derive(Parser)]
#[command(
    name = "orchestrator",
    version,
    about = "Sequential pipeline orchestrator for external agent wrappers"
)]
struct Cli {
    /// Agent toolset whose wrappers implement the steps.
    #[arg(long)]
    agent: String,

    /// Feature identifier (a directory name under the specs dir).
    #[arg(long)]
    feature: String,

    /// Start at this step and run through the end of the pipeline.
    #[arg(long, value_enum)]
    from: Option<Step>,

    /// Run exactly this one step.
    #[arg(long, value_enum)]
    only: Option<Step>,

    /// Print the commands that would run without executing anything.
    #[arg(long)]
    dry_run: bool,

    /// Preferred wrapper flavor.
    #[arg(long, value_enum, default_value_t = Variant::Shell)]
    variant: Variant,

    /// Step registry to use.
    #[arg(long, value_enum, default_value_t = Pipeline::Full)]
    pipeline: Pipeline,

    /// Repository root the wrappers operate on.
    #[arg(long, default_value = ".")]
    repo_root: PathBuf,
}

impl Cli {
    fn into_parts(self) -> (PathBuf, RunRequest) {
        let request = RunRequest {
            agent: self.agent,
            feature: self.feature,
            pipeline: self.pipeline,
            from: self.from,
            only: self.only,
            dry_run: self.dry_run,
            variant: self.variant,
        };
        (self.repo_root, request)
    }
}

fn main() {
    logging::init();
    let (repo_root, request) = Cli::parse().into_parts();
    match run_pipeline(&repo_root, &request, &DiskQuery, &WrapperExecutor) {
        Ok(_) => std::process::exit(exit_codes::OK),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_code_for(&err));
        }
    }
}

/// Mirror the failing wrapper's exit code where one is available.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<StepFailed>() {
        Some(failed) => failed.code,
        None => exit_codes::INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_invocation() {
        let cli = Cli::parse_from(["orchestrator", "--agent", "demo", "--feature", "001-demo"]);
        let (root, request) = cli.into_parts();
        assert_eq!(root, PathBuf::from("."));
        assert_eq!(request.agent, "demo");
        assert_eq!(request.pipeline, Pipeline::Full);
        assert_eq!(request.variant, Variant::Shell);
        assert!(!request.dry_run);
    }

    #[test]
    fn parse_step_and_variant_names() {
        let cli = Cli::parse_from([
            "orchestrator",
            "--agent",
            "codex",
            "--feature",
            "001-x",
            "--from",
            "plan",
            "--variant",
            "native",
            "--pipeline",
            "blitz",
        ]);
        let (_, request) = cli.into_parts();
        assert_eq!(request.from, Some(Step::Plan));
        assert_eq!(request.variant, Variant::Native);
        assert_eq!(request.pipeline, Pipeline::Blitz);
    }

    #[test]
    fn unknown_step_name_is_rejected() {
        let result = Cli::try_parse_from([
            "orchestrator",
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--only",
            "deploy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn step_failed_exit_code_is_propagated() {
        let err = anyhow::Error::from(StepFailed {
            agent: "demo".to_string(),
            step: Step::Plan,
            code: 7,
            log_path: PathBuf::from("x.log"),
        });
        assert_eq!(exit_code_for(&err), 7);
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), exit_codes::INVALID);
    }
}
