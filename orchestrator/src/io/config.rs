//! Orchestrator configuration stored under `.orchestrator/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Orchestrator configuration (TOML).
///
/// This file is intended to be edited by humans and is entirely optional:
/// every field is a repo-root-relative path override with a working default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Directory holding per-agent wrapper directories.
    pub wrappers_dir: PathBuf,

    /// Directory receiving per-step log files.
    pub logs_dir: PathBuf,

    /// Directory holding one subdirectory per feature.
    pub specs_dir: PathBuf,

    /// Directory holding the global constitution artifact.
    pub memory_dir: PathBuf,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            wrappers_dir: PathBuf::from(".orchestrator/agents"),
            logs_dir: PathBuf::from(".orchestrator/logs"),
            specs_dir: PathBuf::from("specs"),
            memory_dir: PathBuf::from("memory"),
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("wrappers_dir", &self.wrappers_dir),
            ("logs_dir", &self.logs_dir),
            ("specs_dir", &self.specs_dir),
            ("memory_dir", &self.memory_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("{name} must not be empty"));
            }
        }
        Ok(())
    }

    /// Feature directory for `feature`, relative to the repo root.
    pub fn feature_dir(&self, feature: &str) -> PathBuf {
        self.specs_dir.join(feature)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `OrchestratorConfig::default()`.
pub fn load_config(path: &Path) -> Result<OrchestratorConfig> {
    if !path.exists() {
        let cfg = OrchestratorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OrchestratorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
