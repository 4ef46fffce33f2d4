//! Reference validation.
//!
//! Checks that script-to-script invocations embedded in command bodies name
//! scripts that actually exist in the full known set, and diagnoses duplicate
//! script names across files. Validation is two-pass: the complete name set
//! is collected across every parsed document (including names nested inside
//! groups) before any command is checked, so forward references across files
//! resolve correctly.
//!
//! Matching package-manager invocations out of arbitrary shell text is a
//! best-effort static check, not a guarantee: missed references and
//! coincidental matches are accepted limitations.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::definition::{visit_definitions, ParsedDocument};

/// One parsed script-definition file, ready for validation.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Source path, carried into diagnostics.
    pub path: PathBuf,
    /// The parsed document.
    pub document: ParsedDocument,
}

/// A non-fatal validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// File the offending script was defined in.
    pub file: PathBuf,
    /// Name of the owning script.
    pub script: String,
    /// The offending command text (empty for name-level diagnostics).
    pub command: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            short_path(&self.file),
            self.script,
            self.message
        )
    }
}

/// Package managers whose invocations are treated as script references.
const PACKAGE_MANAGERS: &[&str] = &["yarn", "npm", "pnpm", "bun"];

/// Common CLI tools that are not flagged by the unknown-command warning.
const COMMON_CLI_COMMANDS: &[&str] = &[
    "node",
    "rm",
    "cp",
    "mv",
    "echo",
    "open",
    "n",
    "sed",
    "webpack",
    "vite",
    "turbo",
    "cross-env",
    "env-cmd",
    "electron-builder",
    "storybook",
];

fn npm_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^npm\s+run\s+(\S+)").expect("valid regex"))
}

fn pm_bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:yarn|pnpm|bun)\s+(\S+)").expect("valid regex"))
}

fn pm_anywhere_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:yarn|npm|pnpm|bun)\s+(?:run\s+)?([A-Za-z0-9:_-]+)").expect("valid regex")
    })
}

fn leading_command_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^([A-Za-z0-9:_-]+)\s").expect("valid regex"))
}

/// Collect every script name across every parsed document, including names
/// nested inside group documents.
pub fn collect_script_names(files: &[ParsedFile]) -> HashSet<String> {
    let mut names = HashSet::new();
    for file in files {
        visit_definitions(&file.document.nodes, &mut |def| {
            names.insert(def.name.clone());
        });
    }
    names
}

/// Validate script-to-script references and duplicate names.
///
/// Never fails; returns the (possibly empty) collected diagnostics. Safe to
/// call repeatedly over independent document sets: inputs are not mutated.
pub fn validate_documents(files: &[ParsedFile]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Pass 1: the full name set, diagnosing duplicates along the way.
    let mut first_seen: HashMap<String, PathBuf> = HashMap::new();
    for file in files {
        visit_definitions(&file.document.nodes, &mut |def| {
            match first_seen.get(&def.name) {
                Some(prev) => errors.push(ValidationError {
                    file: file.path.clone(),
                    script: def.name.clone(),
                    command: String::new(),
                    message: format!(
                        "Script \"{}\" is already defined in \"{}\"",
                        def.name,
                        short_path(prev)
                    ),
                }),
                None => {
                    first_seen.insert(def.name.clone(), file.path.clone());
                }
            }
        });
    }

    // Pass 2: check every command body against the complete set. A body may
    // chain several invocations with `&&`; each segment is checked at its
    // start.
    for file in files {
        visit_definitions(&file.document.nodes, &mut |def| {
            for command in def.command_texts() {
                for segment in command.split("&&").map(str::trim) {
                    let Some(reference) = leading_script_reference(segment) else {
                        continue;
                    };
                    if !first_seen.contains_key(reference) {
                        errors.push(ValidationError {
                            file: file.path.clone(),
                            script: def.name.clone(),
                            command: command.to_string(),
                            message: format!(
                                "Script \"{reference}\" not found in any YAML script file"
                            ),
                        });
                    }
                }
            }
        });
    }

    errors
}

/// Extract a script reference from the start of one command segment.
///
/// Recognized shapes: `npm run <name>`, and the bare `yarn|pnpm|bun <name>`
/// form (`<pm> run <name>` is left to the package manager).
fn leading_script_reference(command: &str) -> Option<&str> {
    if let Some(caps) = npm_run_re().captures(command) {
        return Some(caps.get(1).expect("group 1").as_str());
    }
    if let Some(caps) = pm_bare_re().captures(command) {
        let token = caps.get(1).expect("group 1").as_str();
        if token != "run" {
            return Some(token);
        }
    }
    None
}

/// Audit every command body against the installed-dependency set.
///
/// Used by the documentation-generation path. Every `<pm> [run] <token>`
/// occurrence must name an installed dependency or a known script, else an
/// error is collected. Bare leading tokens that are neither a package
/// manager, an installed dependency, a known script, nor a common CLI tool
/// produce a printed warning, never a collected error.
pub fn audit_commands(
    files: &[ParsedFile],
    installed_packages: &HashSet<String>,
) -> Vec<ValidationError> {
    let names = collect_script_names(files);
    let mut errors = Vec::new();

    for file in files {
        visit_definitions(&file.document.nodes, &mut |def| {
            for command in def.command_texts() {
                audit_command(
                    command,
                    def.name.as_str(),
                    &file.path,
                    &names,
                    installed_packages,
                    &mut errors,
                );
            }
        });
    }

    errors
}

fn audit_command(
    command: &str,
    script: &str,
    path: &Path,
    names: &HashSet<String>,
    installed: &HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for caps in pm_anywhere_re().captures_iter(command) {
        let token = caps.get(1).expect("group 1").as_str();
        if installed.contains(token) || names.contains(token) {
            continue;
        }
        errors.push(ValidationError {
            file: path.to_path_buf(),
            script: script.to_string(),
            command: caps.get(0).expect("whole match").as_str().to_string(),
            message: format!(
                "Script \"{script}\" in \"{}\" references non-existent script \"{token}\"",
                short_path(path)
            ),
        });
    }

    for caps in leading_command_re().captures_iter(command) {
        let token = caps.get(1).expect("group 1").as_str();
        if PACKAGE_MANAGERS.contains(&token)
            || COMMON_CLI_COMMANDS.contains(&token)
            || installed.contains(token)
            || names.contains(token)
        {
            continue;
        }
        eprintln!(
            "Warning: Script \"{script}\" in \"{}\" uses unknown command \"{token}\"",
            short_path(path)
        );
    }
}

/// Shorten a path to its last two components for diagnostics.
fn short_path(path: &Path) -> String {
    let components: Vec<_> = path
        .iter()
        .filter_map(|c| c.to_str())
        .collect();
    let tail = components.len().saturating_sub(2);
    components[tail..].join("/")
}
