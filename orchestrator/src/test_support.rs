//! Fixture scaffolding for tests: stub wrapper scripts inside tempdir repos.
//!
//! Stub wrappers honor the real invocation contract (`--feature <f>
//! --repo-root <root>`), so `$2` is the feature and `$4` the repo root. Each
//! stub appends its step name to `<repo-root>/calls.log` so tests can assert
//! which wrappers ran and in what order.

use std::fs;
use std::path::{Path, PathBuf};

/// Install a shell wrapper at `<root>/.orchestrator/agents/<agent>/<step>.sh`
/// and mark it executable. Returns the wrapper path.
pub fn install_wrapper(root: &Path, agent: &str, step: &str, body: &str) -> PathBuf {
    let dir = root.join(".orchestrator").join("agents").join(agent);
    fs::create_dir_all(&dir).expect("create wrapper dir");
    let path = dir.join(format!("{step}.sh"));
    fs::write(&path, body).expect("write wrapper");
    make_executable(&path);
    path
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod wrapper");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Wrapper body that records its call and, when `artifact` is given, creates
/// that repo-root-relative file with non-empty content.
pub fn ok_wrapper_body(step: &str, artifact: Option<&str>) -> String {
    let mut body = String::from("#!/bin/sh\n");
    body.push_str(&format!("echo \"running {step}\"\n"));
    body.push_str(&format!("printf '%s\\n' {step} >> \"$4/calls.log\"\n"));
    if let Some(rel) = artifact {
        body.push_str(&format!("mkdir -p \"$(dirname \"$4/{rel}\")\"\n"));
        body.push_str(&format!("printf 'content\\n' > \"$4/{rel}\"\n"));
    }
    body
}

/// Wrapper body that records its call, emits some output, and exits `code`.
pub fn failing_wrapper_body(step: &str, code: i32) -> String {
    format!(
        "#!/bin/sh\necho \"{step} exploding\"\nprintf '%s\\n' {step} >> \"$4/calls.log\"\nexit {code}\n"
    )
}

/// Install succeeding wrappers for all five full-pipeline steps, each
/// producing its expected artifact.
pub fn install_full_agent(root: &Path, agent: &str, feature: &str) {
    let artifacts = [
        ("constitution", Some("memory/constitution.md".to_string())),
        ("specify", Some(format!("specs/{feature}/spec.md"))),
        ("plan", Some(format!("specs/{feature}/plan.md"))),
        ("tasks", Some(format!("specs/{feature}/tasks.md"))),
        ("implement", None),
    ];
    for (step, artifact) in artifacts {
        install_wrapper(root, agent, step, &ok_wrapper_body(step, artifact.as_deref()));
    }
}

/// Steps recorded in `<root>/calls.log`, in call order. Empty when no
/// wrapper ever ran.
pub fn recorded_calls(root: &Path) -> Vec<String> {
    match fs::read_to_string(root.join("calls.log")) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
