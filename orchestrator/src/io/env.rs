//! Per-agent environment preparation.
//!
//! Dispatch is a flat lookup on the agent id with a no-op default; overrides
//! are returned as key/value pairs and applied to each child process rather
//! than mutating this process's environment.

use std::path::PathBuf;

use tracing::warn;

/// Compute environment overrides for `agent`. Unrecognized agents get none.
pub fn prepare_env(agent: &str) -> Vec<(String, String)> {
    match agent {
        "claude" => claude_env(),
        _ => Vec::new(),
    }
}

/// Claude wrappers require `CLAUDE_CMD`; default it to the local install
/// location when unset.
fn claude_env() -> Vec<(String, String)> {
    if std::env::var_os("CLAUDE_CMD").is_some() {
        return Vec::new();
    }
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let default = home.join(".claude").join("local").join("claude");
    warn!(
        path = %default.display(),
        "CLAUDE_CMD is unset, defaulting to the local claude install"
    );
    vec![("CLAUDE_CMD".to_string(), default.display().to_string())]
}
