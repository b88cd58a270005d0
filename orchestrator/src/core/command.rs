//! Wrapper command construction and shell-safe rendering.
//!
//! Every wrapper, whatever its implementation language, receives the same
//! argument contract: `--feature <feature> --repo-root <path>`. Native
//! (PowerShell) wrappers are launched through `pwsh` so the contract is
//! identical across variants.

use std::path::Path;

use crate::core::resolve::{ResolvedWrapper, Variant};

/// Build the argv for one wrapper invocation. The first element is the
/// program, the rest are its arguments.
pub fn wrapper_command(wrapper: &ResolvedWrapper, feature: &str, repo_root: &Path) -> Vec<String> {
    let mut argv = Vec::new();
    if wrapper.variant == Variant::Native {
        argv.push("pwsh".to_string());
        argv.push("-NoProfile".to_string());
        argv.push("-File".to_string());
    }
    argv.push(wrapper.path.display().to_string());
    argv.push("--feature".to_string());
    argv.push(feature.to_string());
    argv.push("--repo-root".to_string());
    argv.push(repo_root.display().to_string());
    argv
}

/// Render an argv as a single command line, quoted safely for re-execution.
pub fn render_command(cmd: &[String]) -> String {
    cmd.iter()
        .map(|arg| shell_escape(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_escape(input: &str) -> String {
    if !input.is_empty()
        && input
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '='))
    {
        return input.to_string();
    }
    let mut escaped = String::from("'");
    for ch in input.chars() {
        if ch == '\'' {
            escaped.push_str("'\"'\"'");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}
