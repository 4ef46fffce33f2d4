//! Command wrapping.
//!
//! Turns one command entry into a single executable command-line string by
//! composing the optional modifiers in a fixed order: arguments are appended
//! first, then the environment-file loader, environment variables and the
//! interpreter-version selector are prefixed, innermost to outermost.

use crate::definition::{ArgValue, CommandEntry, CommandSpec};

/// Environment-file loader invocation.
const ENV_FILE_LOADER: &str = "env-cmd -f";
/// Cross-platform environment-variable setter.
const ENV_SETTER: &str = "cross-env";
/// Interpreter-version selector.
const NODE_SELECTOR: &str = "n exec";

/// Wrap one entry of a `commands` sequence.
///
/// Bare-string entries pass through verbatim, with no modifier support.
pub fn wrap_entry(entry: &CommandEntry) -> String {
    match entry {
        CommandEntry::Line(line) => line.clone(),
        CommandEntry::Spec(spec) => wrap_spec(spec),
    }
}

/// Wrap a structured command spec into its final command line.
///
/// Pure and deterministic: the same spec always yields the same string.
/// Field presence, not truthiness, governs whether a modifier applies; the
/// one exception is the boolean-flag rule for `args` and the `node: 0`
/// edge case, which disables interpreter wrapping.
pub fn wrap_spec(spec: &CommandSpec) -> String {
    let mut line = spec.command.clone();

    let fragments: Vec<String> = spec
        .args
        .iter()
        .flat_map(|(key, value)| match value {
            ArgValue::Flag(true) => vec![format!("--{key}")],
            ArgValue::Flag(false) => vec![],
            ArgValue::List(items) => {
                items.iter().map(|item| format!("--{key} {item}")).collect()
            }
            ArgValue::Value(value) => vec![format!("--{key} {value}")],
        })
        .collect();
    if !fragments.is_empty() {
        line = format!("{line} {}", fragments.join(" "));
    }

    if let Some(file) = &spec.env_file {
        line = format!("{ENV_FILE_LOADER} ./{file} {line}");
    }

    if !spec.env.is_empty() {
        let pairs: Vec<String> = spec
            .env
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        line = format!("{ENV_SETTER} {} {line}", pairs.join(" "));
    }

    if let Some(version) = spec.node {
        if version != 0 {
            line = format!("{NODE_SELECTOR} {version} {line}");
        }
    }

    line
}
