//! mpj - Manage Package.json scripts
//!
//! Compiles declarative YAML script definitions into the flat
//! `name -> command line` mapping consumed by npm-style script runners,
//! plus a documentation side table, and offers an interactive fuzzy picker
//! for running the compiled scripts.
//!
//! # Pipeline
//!
//! Script files are discovered under the project's scripts directory,
//! parsed into canonical definitions, flattened (nested groups included)
//! into a [`compile::ScriptBook`], cross-checked by the reference
//! validator, and serialized in a deterministic order, either to a
//! side-by-side preview file or into the real `package.json`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface argument parsing
//! - [`compile`] - Command wrapping, flattening, output serialization
//! - [`config`] - Configuration file loading and types
//! - [`definition`] - Script-definition data model and document parsing
//! - [`error`] - Error types and result helpers
//! - [`filter`] - Fuzzy filtering for the picker
//! - [`manifest`] - package.json access
//! - [`picker`] - Interactive script picker
//! - [`runner`] - Package manager detection and script execution
//! - [`utils`] - Path utilities
//! - [`validate`] - Script reference validation
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! use mpj::compile::{compile_dir, render_scripts_manifest, CompileOptions};
//!
//! let scripts_dir = Path::new("./package-scripts/scripts");
//! let compilation = compile_dir(scripts_dir, &HashSet::new(), &CompileOptions::default())
//!     .expect("Failed to compile scripts");
//!
//! println!("{}", render_scripts_manifest(compilation.book.scripts()));
//! ```

/// CLI argument definitions.
pub mod cli;

/// The script-definition compiler: wrapping, flattening, serialization.
pub mod compile;

/// Configuration system for loading and merging settings.
pub mod config;

/// Script-definition data model and document parsing.
pub mod definition;

/// Error types and result helpers.
pub mod error;

/// Fuzzy filtering for the picker.
pub mod filter;

/// Project manifest (package.json) access.
pub mod manifest;

/// Interactive script picker.
pub mod picker;

/// Package manager detection and script execution.
pub mod runner;

/// Path utilities.
pub mod utils;

/// Script reference validation.
pub mod validate;

// Re-export commonly used types
pub use cli::Cli;
pub use compile::{Compilation, ScriptBook};
pub use config::Config;
pub use error::{MpjError, Result};
pub use runner::Runner;
