//! Package manager detection and command building.
//!
//! Detects the appropriate package manager for a project based on:
//! 1. `packageManager` field in package.json (highest priority)
//! 2. Lock file detection
//! 3. Fallback to npm

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runner {
    /// Node Package Manager (npm)
    #[default]
    Npm,
    /// Yarn package manager
    Yarn,
    /// pnpm - Fast, disk space efficient package manager
    Pnpm,
    /// Bun - Fast all-in-one JavaScript runtime
    Bun,
}

impl Runner {
    /// Get the executable name for this runner.
    pub fn executable(&self) -> &'static str {
        match self {
            Runner::Npm => "npm",
            Runner::Yarn => "yarn",
            Runner::Pnpm => "pnpm",
            Runner::Bun => "bun",
        }
    }

    /// Get the command to run a script as a vector of arguments.
    pub fn run_command(&self, script: &str) -> Vec<String> {
        match self {
            Runner::Npm => vec!["npm".into(), "run".into(), script.into()],
            Runner::Yarn => vec!["yarn".into(), script.into()],
            Runner::Pnpm => vec!["pnpm".into(), script.into()],
            Runner::Bun => vec!["bun".into(), "run".into(), script.into()],
        }
    }

    /// Format the run command as a string for display.
    pub fn format_command(&self, script: &str) -> String {
        self.run_command(script).join(" ")
    }

    /// Parse a runner from a package manager name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "npm" => Some(Runner::Npm),
            "yarn" => Some(Runner::Yarn),
            "pnpm" => Some(Runner::Pnpm),
            "bun" => Some(Runner::Bun),
            _ => None,
        }
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable())
    }
}

/// Lock files checked during detection, in priority order.
const LOCK_FILES: &[(&str, Runner)] = &[
    ("package-lock.json", Runner::Npm),
    ("yarn.lock", Runner::Yarn),
    ("pnpm-lock.yaml", Runner::Pnpm),
    ("bun.lockb", Runner::Bun),
    ("bun.lock", Runner::Bun),
];

/// Detect the package manager for a project.
pub fn detect_runner(project_dir: &Path, manifest: &Manifest) -> Runner {
    detect_runner_reason(project_dir, manifest).0
}

/// Detect the package manager, returning the reason for debug output.
pub fn detect_runner_reason(project_dir: &Path, manifest: &Manifest) -> (Runner, String) {
    if let Some(runner) = manifest.package_manager_name().and_then(Runner::from_name) {
        return (runner, "packageManager field".to_string());
    }

    for (lock_file, runner) in LOCK_FILES {
        if project_dir.join(lock_file).exists() {
            return (*runner, format!("{lock_file} found"));
        }
    }

    (Runner::Npm, "default".to_string())
}
