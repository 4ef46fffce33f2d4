//! Script-definition document parsing.
//!
//! Decodes YAML text and normalizes the three accepted document shapes
//! (single definition, bare sequence, `{ scripts: [...] }` group) into a
//! canonical list of [`ScriptNode`]s. Nested groups are preserved so the
//! processor can recurse into them.
//!
//! Structural problems (missing `name`, missing command source) abort the
//! parse under [`Strictness::Strict`] and are skipped with a collected
//! diagnostic under [`Strictness::Lenient`]. A YAML decode failure is always
//! fatal.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{MpjError, Result};

use super::types::{ArgValue, CommandEntry, CommandSpec, Scalar, ScriptDefinition, ScriptNode};

/// How structural errors in a definition are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Fail the whole parse on the first incomplete definition.
    #[default]
    Strict,
    /// Skip incomplete definitions, collecting a diagnostic for each.
    Lenient,
}

/// The result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Canonical nodes, in authoring order.
    pub nodes: Vec<ScriptNode>,
    /// Diagnostics for definitions skipped in lenient mode.
    pub skipped: Vec<String>,
}

/// Parse one script-definition document.
///
/// # Errors
///
/// Returns [`MpjError::DocumentSyntax`] when the YAML cannot be decoded, and
/// [`MpjError::MissingName`] / [`MpjError::MissingCommand`] for structurally
/// incomplete definitions in strict mode.
pub fn parse_document(text: &str, strictness: Strictness) -> Result<ParsedDocument> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| MpjError::DocumentSyntax {
        message: e.to_string(),
    })?;

    let mut doc = ParsedDocument::default();

    match value {
        // Group document: { scripts: [...] }
        Value::Mapping(ref map) if script_list(map).is_some() => {
            for element in script_list(map).expect("checked above") {
                push_node(element, strictness, &mut doc)?;
            }
        }
        // Bare sequence of definitions.
        Value::Sequence(ref elements) => {
            for element in elements {
                push_node(element, strictness, &mut doc)?;
            }
        }
        // Single definition.
        ref single => push_node(single, strictness, &mut doc)?,
    }

    Ok(doc)
}

/// Get the `scripts` sequence of a group mapping, if present.
fn script_list(map: &Mapping) -> Option<&Vec<Value>> {
    map.get("scripts").and_then(Value::as_sequence)
}

/// Normalize one element and append it, honoring the strictness mode.
fn push_node(value: &Value, strictness: Strictness, doc: &mut ParsedDocument) -> Result<()> {
    match normalize_node(value, strictness, doc) {
        Ok(Some(node)) => {
            doc.nodes.push(node);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) if strictness == Strictness::Lenient => {
            doc.skipped
                .push(format!("Skipped invalid script definition: {err}"));
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Normalize one element into a [`ScriptNode`], recursing into groups.
fn normalize_node(
    value: &Value,
    strictness: Strictness,
    doc: &mut ParsedDocument,
) -> Result<Option<ScriptNode>> {
    let map = match value.as_mapping() {
        Some(map) => map,
        None => return Err(MpjError::MissingName),
    };

    if let Some(elements) = script_list(map) {
        let mut children = Vec::with_capacity(elements.len());
        for element in elements {
            match normalize_node(element, strictness, doc) {
                Ok(Some(node)) => children.push(node),
                Ok(None) => {}
                Err(err) if strictness == Strictness::Lenient => doc
                    .skipped
                    .push(format!("Skipped invalid script definition: {err}")),
                Err(err) => return Err(err),
            }
        }
        return Ok(Some(ScriptNode::Group(children)));
    }

    normalize_definition(map).map(|def| Some(ScriptNode::Definition(def)))
}

/// Normalize one definition mapping into its canonical shape.
///
/// A top-level `command` is rewritten into a one-entry `commands` sequence
/// carrying the top-level `args` / `env` / `env-file` / `node` modifiers, so
/// the original fields have no duplicate representation downstream.
fn normalize_definition(map: &Mapping) -> Result<ScriptDefinition> {
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or(MpjError::MissingName)?
        .to_string();

    let commands = if map.get("command").and_then(Value::as_str).is_some() {
        vec![CommandEntry::Spec(command_spec(map, &name)?)]
    } else if let Some(entries) = map.get("commands").and_then(Value::as_sequence) {
        let mut commands = Vec::with_capacity(entries.len());
        for entry in entries {
            commands.push(command_entry(entry, &name)?);
        }
        commands
    } else {
        return Err(MpjError::MissingCommand { name });
    };

    Ok(ScriptDefinition {
        name,
        long_name: optional_str(map, "longName"),
        description: optional_str(map, "description"),
        group: optional_str(map, "group"),
        commands,
    })
}

/// Normalize one `commands` entry: bare strings stay as-is, mappings become
/// structured specs.
fn command_entry(value: &Value, script: &str) -> Result<CommandEntry> {
    match value {
        Value::String(line) => Ok(CommandEntry::Line(line.clone())),
        Value::Mapping(map) => Ok(CommandEntry::Spec(command_spec(map, script)?)),
        _ => Err(MpjError::InvalidCommandEntry {
            name: script.to_string(),
        }),
    }
}

/// Build a [`CommandSpec`] from a mapping holding `command` plus modifiers.
fn command_spec(map: &Mapping, script: &str) -> Result<CommandSpec> {
    let command = map
        .get("command")
        .and_then(Value::as_str)
        .ok_or_else(|| MpjError::MissingCommand {
            name: script.to_string(),
        })?
        .to_string();

    Ok(CommandSpec {
        command,
        node: map.get("node").and_then(Value::as_u64).map(|v| v as u32),
        env: scalar_map(map.get("env")),
        env_file: map
            .get("env-file")
            .and_then(Value::as_str)
            .map(str::to_string),
        args: arg_map(map.get("args")),
    })
}

fn optional_str(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Convert a YAML scalar into a [`Scalar`]. Non-scalar values yield `None`.
fn scalar(value: &Value) -> Option<Scalar> {
    match value {
        Value::Bool(b) => Some(Scalar::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Scalar::Int(i)),
            None => n.as_f64().map(Scalar::Float),
        },
        Value::String(s) => Some(Scalar::Str(s.clone())),
        _ => None,
    }
}

/// Read a `key -> scalar` mapping, preserving key order. Non-scalar values
/// are dropped.
fn scalar_map(value: Option<&Value>) -> IndexMap<String, Scalar> {
    let mut out = IndexMap::new();
    if let Some(map) = value.and_then(Value::as_mapping) {
        for (key, val) in map {
            if let (Some(key), Some(val)) = (key.as_str(), scalar(val)) {
                out.insert(key.to_string(), val);
            }
        }
    }
    out
}

/// Read a `key -> flag value` mapping, preserving key order.
fn arg_map(value: Option<&Value>) -> IndexMap<String, ArgValue> {
    let mut out = IndexMap::new();
    if let Some(map) = value.and_then(Value::as_mapping) {
        for (key, val) in map {
            let Some(key) = key.as_str() else { continue };
            let arg = match val {
                Value::Bool(b) => Some(ArgValue::Flag(*b)),
                Value::Sequence(items) => Some(ArgValue::List(
                    items.iter().filter_map(scalar).collect(),
                )),
                other => scalar(other).map(ArgValue::Value),
            };
            if let Some(arg) = arg {
                out.insert(key.to_string(), arg);
            }
        }
    }
    out
}
