//! Canonical types for script definitions.
//!
//! Every document shape the parser accepts (single definition, bare sequence,
//! nested group) is normalized into these types before any other component
//! sees the data.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar value allowed in `env` and `args` maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => write!(f, "{s}"),
        }
    }
}

/// The value of one `args` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// `true` emits the bare flag, `false` emits nothing.
    Flag(bool),
    /// The flag is repeated once per element.
    List(Vec<Scalar>),
    /// The flag is followed by the value.
    Value(Scalar),
}

/// One unit of execution with its optional modifiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandSpec {
    /// The command body.
    pub command: String,

    /// Interpreter major version; `0` or absent means no version wrapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<u32>,

    /// Environment variables injected in front of the command.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub env: IndexMap<String, Scalar>,

    /// Relative path to an environment file loaded before `env`.
    #[serde(default, rename = "env-file", skip_serializing_if = "Option::is_none")]
    pub env_file: Option<String>,

    /// Flags appended after the command, in key order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub args: IndexMap<String, ArgValue>,
}

impl CommandSpec {
    /// Create a spec with just a command body.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }
}

/// One entry of a `commands` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandEntry {
    /// A bare string, used verbatim with no modifier support.
    Line(String),
    /// A structured entry with modifiers.
    Spec(CommandSpec),
}

impl CommandEntry {
    /// Get the raw command text of this entry.
    pub fn command_text(&self) -> &str {
        match self {
            CommandEntry::Line(s) => s,
            CommandEntry::Spec(spec) => &spec.command,
        }
    }
}

/// A normalized script definition.
///
/// A definition authored with a single `command` has already been rewritten
/// into a one-entry `commands` sequence by the parser; the top-level modifier
/// fields do not survive normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDefinition {
    /// Unique script name, the output mapping key.
    pub name: String,

    /// Human-readable long name.
    #[serde(default, rename = "longName", skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    /// One-line description shown in the picker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Picker group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Command bodies executed in sequence.
    pub commands: Vec<CommandEntry>,
}

impl ScriptDefinition {
    /// Check if this definition carries any documentation metadata.
    pub fn has_docs(&self) -> bool {
        self.long_name.is_some() || self.description.is_some() || self.group.is_some()
    }

    /// Iterate over the raw command texts of all entries.
    pub fn command_texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(CommandEntry::command_text)
    }
}

impl fmt::Display for ScriptDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{} - {}", self.name, desc),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One node of a parsed document: a definition, or a nested group of them.
///
/// Groups may nest to arbitrary depth; the processor recurses into them.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptNode {
    /// A single script definition.
    Definition(ScriptDefinition),
    /// A `{ scripts: [...] }` group.
    Group(Vec<ScriptNode>),
}

impl ScriptNode {
    /// Visit every definition in this subtree, depth first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ScriptDefinition)) {
        match self {
            ScriptNode::Definition(def) => f(def),
            ScriptNode::Group(children) => {
                for child in children {
                    child.visit(f);
                }
            }
        }
    }
}

/// Visit every definition across a slice of nodes, depth first.
pub fn visit_definitions<'a>(nodes: &'a [ScriptNode], f: &mut impl FnMut(&'a ScriptDefinition)) {
    for node in nodes {
        node.visit(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str) -> ScriptDefinition {
        ScriptDefinition {
            name: name.to_string(),
            long_name: None,
            description: None,
            group: None,
            commands: vec![CommandEntry::Line("echo hi".to_string())],
        }
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Int(18).to_string(), "18");
        assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Str("x".to_string()).to_string(), "x");
    }

    #[test]
    fn test_command_text() {
        let line = CommandEntry::Line("echo hi".to_string());
        assert_eq!(line.command_text(), "echo hi");

        let spec = CommandEntry::Spec(CommandSpec::new("vite build"));
        assert_eq!(spec.command_text(), "vite build");
    }

    #[test]
    fn test_has_docs() {
        let mut def = definition("build");
        assert!(!def.has_docs());

        def.group = Some("ci".to_string());
        assert!(def.has_docs());
    }

    #[test]
    fn test_definition_display() {
        let mut def = definition("build");
        assert_eq!(def.to_string(), "build");

        def.description = Some("Build the app".to_string());
        assert_eq!(def.to_string(), "build - Build the app");
    }

    #[test]
    fn test_visit_nested_groups() {
        let tree = vec![
            ScriptNode::Definition(definition("a")),
            ScriptNode::Group(vec![
                ScriptNode::Definition(definition("b")),
                ScriptNode::Group(vec![ScriptNode::Definition(definition("c"))]),
            ]),
        ];

        let mut seen = Vec::new();
        visit_definitions(&tree, &mut |def| seen.push(def.name.clone()));
        assert_eq!(seen, vec!["a", "b", "c"]);
    }
}
