//! Custom error types for mpj.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for mpj.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// No package.json found.
    pub const NO_MANIFEST: i32 = 2;
    /// No compiled scripts available.
    pub const NO_SCRIPTS: i32 = 3;
    /// Compilation finished but validation errors were found.
    pub const VALIDATION_FAILED: i32 = 4;
    /// Invalid configuration.
    pub const INVALID_CONFIG: i32 = 5;
    /// Interrupted (Ctrl+C).
    pub const INTERRUPTED: i32 = 130;
}

/// Main error type for mpj.
#[derive(Error, Debug)]
pub enum MpjError {
    /// A script-definition document failed to decode.
    #[error("Failed to parse script file: {message}")]
    DocumentSyntax { message: String },

    /// A script definition has no `name` field.
    #[error("Script definition is missing the 'name' field")]
    MissingName,

    /// A script definition has neither `command` nor `commands`.
    #[error("Script '{name}' must define either 'command' or 'commands'")]
    MissingCommand { name: String },

    /// A `commands` entry is neither a string nor a command mapping.
    #[error("Script '{name}' has a commands entry that is neither a string nor a command mapping")]
    InvalidCommandEntry { name: String },

    /// No package.json found.
    #[error(
        "No package.json found in {path} or any parent directory (searched up to {depth} levels)"
    )]
    NoManifest { path: PathBuf, depth: usize },

    /// Failed to parse the project manifest.
    #[error("Failed to parse package.json at {path}:\n  {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The scripts directory does not exist.
    #[error("Scripts directory not found: {path}\n\nTip: Create it and add YAML script files:\n  {path}/build.script.yaml")]
    ScriptsDirMissing { path: PathBuf },

    /// No compiled scripts/docs tables to load for the run phase.
    #[error("No compiled scripts found at {path}\n\nTip: Run 'mpj parse' or 'mpj write' first to compile your script files.")]
    NoCompiledScripts { path: PathBuf },

    /// Invalid configuration file.
    #[error("Invalid config at {path}:\n  {message}\n\nTip: Check the config file syntax and ensure all values are valid.")]
    InvalidConfig { path: PathBuf, message: String },

    /// IO error with path context.
    #[error("Failed to {operation} '{path}': {source}")]
    IoWithContext {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MpjError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            MpjError::DocumentSyntax { .. } => exit_code::GENERAL_ERROR,
            MpjError::MissingName => exit_code::GENERAL_ERROR,
            MpjError::MissingCommand { .. } => exit_code::GENERAL_ERROR,
            MpjError::InvalidCommandEntry { .. } => exit_code::GENERAL_ERROR,
            MpjError::NoManifest { .. } => exit_code::NO_MANIFEST,
            MpjError::ManifestParse { .. } => exit_code::NO_MANIFEST,
            MpjError::ScriptsDirMissing { .. } => exit_code::NO_SCRIPTS,
            MpjError::NoCompiledScripts { .. } => exit_code::NO_SCRIPTS,
            MpjError::InvalidConfig { .. } => exit_code::INVALID_CONFIG,
            MpjError::IoWithContext { .. } => exit_code::GENERAL_ERROR,
            MpjError::Io(_) => exit_code::GENERAL_ERROR,
        }
    }

    /// Wrap an IO error with the operation and path it came from.
    pub fn io_context(operation: impl Into<String>, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let operation = operation.into();
        let path = path.into();
        move |source| MpjError::IoWithContext {
            operation,
            path,
            source,
        }
    }
}

/// Result type alias for mpj operations.
pub type Result<T> = std::result::Result<T, MpjError>;
