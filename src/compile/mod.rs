//! The script-definition compiler pipeline.
//!
//! Ties discovery, parsing, flattening and validation together into one
//! compile pass over a project's scripts directory.

mod book;
mod output;
mod wrap;

pub use book::{DocEntry, ScriptBook};
pub use output::{render_docs, render_scripts_manifest, sort_scripts};
pub use wrap::{wrap_entry, wrap_spec};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::definition::{parse_document, Strictness};
use crate::error::MpjError;
use crate::utils::collect_script_files;
use crate::validate::{audit_commands, validate_documents, ParsedFile, ValidationError};

/// Options for one compile pass.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// How structural errors in definitions are handled.
    pub strictness: Strictness,
    /// Run the secondary command audit against installed dependencies.
    pub audit: bool,
}

/// The result of one compile pass.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Compiled scripts and docs.
    pub book: ScriptBook,
    /// Collected validation diagnostics, in discovery order.
    pub errors: Vec<ValidationError>,
    /// Diagnostics for definitions skipped in lenient mode.
    pub skipped: Vec<String>,
    /// Number of script files processed.
    pub file_count: usize,
}

impl Compilation {
    /// Check whether validation found any problems.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compile every script-definition file under `scripts_dir`.
///
/// Files are parsed in sorted path order; each file's book is merged into
/// the result, later definitions overwriting earlier ones on name clashes
/// (which validation diagnoses). Validation never aborts the pass: a
/// compilation with errors still carries a complete book.
///
/// # Errors
///
/// Fails when the directory cannot be enumerated, a file cannot be read, a
/// document cannot be decoded, or (in strict mode) a definition is
/// structurally incomplete.
pub fn compile_dir(
    scripts_dir: &Path,
    installed_packages: &HashSet<String>,
    options: &CompileOptions,
) -> Result<Compilation> {
    let paths = collect_script_files(scripts_dir)?;

    let mut parsed = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        let text = fs::read_to_string(&path)
            .map_err(MpjError::io_context("read", path.clone()))?;
        let document = parse_document(&text, options.strictness)
            .with_context(|| format!("in {}", path.display()))?;

        skipped.extend(
            document
                .skipped
                .iter()
                .map(|diag| format!("{}: {diag}", path.display())),
        );
        parsed.push(ParsedFile { path, document });
    }

    let mut errors = validate_documents(&parsed);
    if options.audit {
        errors.extend(audit_commands(&parsed, installed_packages));
    }

    let mut book = ScriptBook::new();
    for file in &parsed {
        let mut file_book = ScriptBook::new();
        file_book.absorb(&file.document.nodes);
        book.merge(file_book);
    }

    Ok(Compilation {
        book,
        errors,
        skipped,
        file_count: parsed.len(),
    })
}
