//! Script execution.
//!
//! Launches a chosen script through the host package manager's run
//! mechanism, with stdio inherited so output streams straight back to the
//! caller.

use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use super::manager::Runner;

/// Exit code when interrupted by Ctrl+C (SIGINT).
/// On Unix, this is 128 + signal number (SIGINT = 2).
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Result of script execution.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Exit status of the script.
    pub status: ExitStatus,
    /// The command that was executed, for display.
    pub command: String,
}

impl ExecutionResult {
    /// Check if the execution was successful.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Get the exit code, mapping a signal death to the interrupted code.
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(EXIT_CODE_INTERRUPTED)
    }
}

/// Run a script with the given runner in the project directory.
///
/// # Errors
///
/// Returns an error if the package manager fails to spawn.
pub fn execute_script(runner: Runner, script: &str, project_dir: &Path) -> Result<ExecutionResult> {
    let argv = runner.run_command(script);
    let command = argv.join(" ");

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .current_dir(project_dir)
        .status()
        .with_context(|| format!("Failed to spawn '{command}'"))?;

    Ok(ExecutionResult { status, command })
}
