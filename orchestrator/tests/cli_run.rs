//! End-to-end CLI tests: spawn the orchestrator binary against tempdir
//! repos scaffolded with stub wrapper scripts, and verify step ordering,
//! log files, and exit codes.

#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};

use orchestrator::core::command::{render_command, wrapper_command};
use orchestrator::core::registry::Pipeline;
use orchestrator::core::resolve::{ResolvedWrapper, Variant};
use orchestrator::exit_codes;
use orchestrator::test_support::{
    failing_wrapper_body, install_full_agent, install_wrapper, ok_wrapper_body, recorded_calls,
};

fn run_orchestrator(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_orchestrator"))
        .arg("--repo-root")
        .arg(root)
        .args(args)
        .output()
        .expect("spawn orchestrator")
}

fn step_logs(root: &Path, step: &str) -> Vec<std::path::PathBuf> {
    let logs_dir = root.join(".orchestrator").join("logs");
    if !logs_dir.exists() {
        return Vec::new();
    }
    let suffix = format!("-{step}.log");
    std::fs::read_dir(logs_dir)
        .expect("read logs dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.to_string_lossy().ends_with(&suffix))
        .collect()
}

#[test]
fn full_pipeline_runs_all_steps_in_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");

    let output = run_orchestrator(root, &["--agent", "demo", "--feature", "001-demo"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        recorded_calls(root),
        vec!["constitution", "specify", "plan", "tasks", "implement"]
    );
    assert!(root.join("memory/constitution.md").is_file());
    assert!(root.join("specs/001-demo/tasks.md").is_file());
    for step in ["constitution", "specify", "plan", "tasks", "implement"] {
        assert_eq!(step_logs(root, step).len(), 1, "one log for {step}");
    }
}

#[test]
fn only_flag_invokes_exactly_one_wrapper() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");

    let output = run_orchestrator(
        root,
        &["--agent", "demo", "--feature", "001-demo", "--only", "tasks"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(recorded_calls(root), vec!["tasks"]);
}

#[test]
fn only_flag_exit_code_reflects_that_step() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");
    install_wrapper(root, "demo", "tasks", &failing_wrapper_body("tasks", 5));

    let output = run_orchestrator(
        root,
        &["--agent", "demo", "--feature", "001-demo", "--only", "tasks"],
    );

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(recorded_calls(root), vec!["tasks"]);
}

#[test]
fn failing_step_halts_run_and_propagates_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");
    install_wrapper(root, "demo", "plan", &failing_wrapper_body("plan", 7));

    let output = run_orchestrator(
        root,
        &["--agent", "demo", "--feature", "001-demo", "--from", "plan"],
    );

    assert_eq!(output.status.code(), Some(7));
    // Tasks and implement never ran.
    assert_eq!(recorded_calls(root), vec!["plan"]);

    let logs = step_logs(root, "plan");
    assert_eq!(logs.len(), 1);
    let log = std::fs::read_to_string(&logs[0]).expect("read plan log");
    assert!(log.contains("plan exploding"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("plan"));
    assert!(stderr.contains("exit code 7"));
}

#[test]
fn dry_run_prints_commands_and_spawns_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");

    let output = run_orchestrator(
        root,
        &["--agent", "demo", "--feature", "001-demo", "--dry-run"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(recorded_calls(root).is_empty(), "no wrapper may run");
    assert!(!root.join(".orchestrator/logs").exists(), "no log files");

    // The printed command lines match what a real run would execute.
    let expected: Vec<String> = Pipeline::Full
        .steps()
        .iter()
        .map(|step| {
            let wrapper = ResolvedWrapper {
                path: root
                    .join(".orchestrator/agents/demo")
                    .join(format!("{step}.sh")),
                variant: Variant::Shell,
            };
            render_command(&wrapper_command(&wrapper, "001-demo", root))
        })
        .collect();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let printed: Vec<&str> = stdout.lines().collect();
    assert_eq!(printed, expected);
}

#[test]
fn dry_run_still_fails_on_unresolvable_wrapper() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    // No wrappers installed at all.

    let output = run_orchestrator(
        root,
        &["--agent", "demo", "--feature", "001-demo", "--dry-run"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no usable wrapper"));
}

#[test]
fn native_preference_falls_back_to_shell_wrapper() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");

    let output = run_orchestrator(
        root,
        &[
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--only",
            "tasks",
            "--variant",
            "native",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(recorded_calls(root), vec!["tasks"]);
}

#[test]
fn successful_step_without_artifact_fails_validation() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    // Wrapper exits zero but produces nothing.
    install_wrapper(root, "demo", "specify", &ok_wrapper_body("specify", None));

    let output = run_orchestrator(
        root,
        &[
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--only",
            "specify",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing or empty"));
}

#[test]
fn conflicting_from_and_only_never_start_the_run() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");

    let output = run_orchestrator(
        root,
        &[
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--from",
            "plan",
            "--only",
            "tasks",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(recorded_calls(root).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mutually exclusive"));
}

#[test]
fn unknown_flag_is_a_configuration_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_orchestrator(
        temp.path(),
        &["--agent", "demo", "--feature", "001-demo", "--bogus"],
    );
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn blitz_pipeline_runs_three_steps() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");
    // Satisfy the blitz precondition so no warning fires.
    std::fs::create_dir_all(root.join("specs/001-demo")).expect("feature dir");
    std::fs::write(root.join("specs/001-demo/spec.md"), "# Spec\n").expect("write spec");

    let output = run_orchestrator(
        root,
        &[
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--pipeline",
            "blitz",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(recorded_calls(root), vec!["plan", "tasks", "implement"]);
}

#[test]
fn blitz_without_prior_spec_warns_but_runs() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    install_full_agent(root, "demo", "001-demo");

    let output = run_orchestrator(
        root,
        &[
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--pipeline",
            "blitz",
        ],
    );

    // The plan wrapper creates plan.md, tasks creates tasks.md; spec.md is
    // not a blitz artifact, so the run still completes.
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("blitz pipeline assumes earlier stages ran"));
}

#[test]
fn config_file_can_relocate_the_specs_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    std::fs::create_dir_all(root.join(".orchestrator")).expect("dot dir");
    std::fs::write(
        root.join(".orchestrator/config.toml"),
        "specs_dir = \"features\"\n",
    )
    .expect("write config");
    install_wrapper(
        root,
        "demo",
        "specify",
        &ok_wrapper_body("specify", Some("features/001-demo/spec.md")),
    );

    let output = run_orchestrator(
        root,
        &[
            "--agent",
            "demo",
            "--feature",
            "001-demo",
            "--only",
            "specify",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(root.join("features/001-demo/spec.md").is_file());
}
