//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::MpjError;

use super::types::Config;

/// Load configuration from the specified path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).map_err(|e| MpjError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(config)
}

/// Load configuration with proper priority and merging.
///
/// Searches for config files in order of priority (lowest to highest):
/// 1. `~/.config/mpj/config.toml` (user-level, lowest priority)
/// 2. `.mpjrc.toml` in project root (project-level)
/// 3. CLI argument `--config <path>` (highest priority)
///
/// Configs are merged with higher priority configs overriding lower priority
/// ones. Missing config files are handled gracefully (defaults are used).
///
/// # Errors
///
/// Returns an error if a specified config file (via CLI) cannot be read or
/// parsed. Missing default config files are not treated as errors.
pub fn load_config(cli_config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let mut config = Config::default();

    // Load user-level config (lowest priority)
    if let Some(user_config_path) = Config::user_config_path() {
        if user_config_path.exists() {
            match load_config_from_path(&user_config_path) {
                Ok(user_config) => config.merge(user_config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to load user config at {}: {}",
                        user_config_path.display(),
                        e
                    );
                }
            }
        }
    }

    // Load project-level config (medium priority)
    let project_config_path = project_dir.join(".mpjrc.toml");
    if project_config_path.exists() {
        match load_config_from_path(&project_config_path) {
            Ok(project_config) => config.merge(project_config),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load project config at {}: {}",
                    project_config_path.display(),
                    e
                );
            }
        }
    }

    // Load CLI-specified config (highest priority)
    if let Some(cli_path) = cli_config_path {
        let cli_config = load_config_from_path(cli_path).with_context(|| {
            format!(
                "Failed to load config from CLI-specified path: {}",
                cli_path.display()
            )
        })?;
        config.merge(cli_config);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::definition::Strictness;

    use super::*;

    #[test]
    fn test_load_with_no_files_is_default() {
        let temp = TempDir::new().unwrap();
        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".mpjrc.toml"),
            "[compile]\nstrictness = \"lenient\"\n",
        )
        .unwrap();

        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config.strictness(), Strictness::Lenient);
    }

    #[test]
    fn test_cli_config_overrides_project() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".mpjrc.toml"), "[compile]\naudit = false\n").unwrap();

        let cli_config = temp.path().join("override.toml");
        fs::write(&cli_config, "[compile]\naudit = true\n").unwrap();

        let config = load_config(Some(&cli_config), temp.path()).unwrap();
        assert!(config.audit());
    }

    #[test]
    fn test_missing_cli_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("missing.toml")), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_project_config_falls_back() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".mpjrc.toml"), "not [valid toml").unwrap();

        // Invalid project config warns and keeps defaults.
        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
