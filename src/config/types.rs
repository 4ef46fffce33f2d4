//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::definition::Strictness;
use crate::runner::Runner;
use crate::utils::global_config_file;

/// Compile settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Scripts directory, relative to the project root.
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    /// How structural errors in definitions are handled.
    #[serde(default)]
    pub strictness: Option<Strictness>,

    /// Run the secondary command audit during compilation.
    #[serde(default)]
    pub audit: Option<bool>,
}

/// Run-phase settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Override package manager detection.
    #[serde(default)]
    pub runner: Option<Runner>,

    /// Search in descriptions too when filtering.
    #[serde(default)]
    pub search_descriptions: Option<bool>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Compile settings.
    #[serde(default)]
    pub compile: CompileConfig,

    /// Run-phase settings.
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Overlay another config on top of this one; set fields win.
    pub fn merge(&mut self, other: Config) {
        if other.compile.scripts_dir.is_some() {
            self.compile.scripts_dir = other.compile.scripts_dir;
        }
        if other.compile.strictness.is_some() {
            self.compile.strictness = other.compile.strictness;
        }
        if other.compile.audit.is_some() {
            self.compile.audit = other.compile.audit;
        }
        if other.run.runner.is_some() {
            self.run.runner = other.run.runner;
        }
        if other.run.search_descriptions.is_some() {
            self.run.search_descriptions = other.run.search_descriptions;
        }
    }

    /// Effective strictness (strict unless configured otherwise).
    pub fn strictness(&self) -> Strictness {
        self.compile.strictness.unwrap_or_default()
    }

    /// Effective audit toggle.
    pub fn audit(&self) -> bool {
        self.compile.audit.unwrap_or(false)
    }

    /// Effective description-search toggle.
    pub fn search_descriptions(&self) -> bool {
        self.run.search_descriptions.unwrap_or(true)
    }

    /// User-level config path (`~/.config/mpj/config.toml`).
    pub fn user_config_path() -> Option<PathBuf> {
        global_config_file()
    }
}
