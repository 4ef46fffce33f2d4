//! Script flattening and accumulation.
//!
//! [`ScriptBook`] is the aggregator the whole compile pass writes into: it
//! owns the `name -> command line` mapping and the `name -> docs` table,
//! absorbs parsed documents one at a time (recursing into nested groups),
//! and merges with other books so independently processed files can be
//! combined afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::definition::{ScriptDefinition, ScriptNode};

use super::wrap::wrap_entry;

/// Sequencing operator between the entries of a multi-command script.
/// A failing command short-circuits the remainder.
const COMMAND_JOIN: &str = " && ";

/// Documentation metadata for one script.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocEntry {
    /// Human-readable long name.
    #[serde(default, rename = "longName", skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Picker group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Accumulator for compiled scripts and their documentation table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptBook {
    scripts: IndexMap<String, String>,
    docs: IndexMap<String, DocEntry>,
}

impl ScriptBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `name -> command line` mapping, in insertion order.
    pub fn scripts(&self) -> &IndexMap<String, String> {
        &self.scripts
    }

    /// The `name -> docs` table, populated only for scripts that declare
    /// at least one metadata field.
    pub fn docs(&self) -> &IndexMap<String, DocEntry> {
        &self.docs
    }

    /// Number of compiled scripts.
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Check whether no scripts have been compiled.
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Get one compiled command line by script name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    /// Flatten parsed nodes into the book, recursing into nested groups.
    pub fn absorb(&mut self, nodes: &[ScriptNode]) {
        for node in nodes {
            match node {
                ScriptNode::Definition(def) => self.insert(def),
                ScriptNode::Group(children) => self.absorb(children),
            }
        }
    }

    /// Compile one definition into the book.
    ///
    /// A later definition with the same name overwrites an earlier one; the
    /// reference validator is responsible for diagnosing duplicates.
    pub fn insert(&mut self, def: &ScriptDefinition) {
        let line = def
            .commands
            .iter()
            .map(wrap_entry)
            .collect::<Vec<_>>()
            .join(COMMAND_JOIN);

        self.scripts.insert(def.name.clone(), line);

        if def.has_docs() {
            self.docs.insert(
                def.name.clone(),
                DocEntry {
                    long_name: def.long_name.clone(),
                    description: def.description.clone(),
                    group: def.group.clone(),
                },
            );
        }
    }

    /// Union another book into this one, last write winning on name clashes.
    pub fn merge(&mut self, other: ScriptBook) {
        self.scripts.extend(other.scripts);
        self.docs.extend(other.docs);
    }
}

#[cfg(test)]
mod tests {
    use crate::definition::{parse_document, CommandEntry, Strictness};

    use super::*;

    fn parse_nodes(text: &str) -> Vec<ScriptNode> {
        parse_document(text, Strictness::Strict).unwrap().nodes
    }

    #[test]
    fn test_single_command_no_joining() {
        let mut book = ScriptBook::new();
        book.absorb(&parse_nodes("name: build\ncommand: vite build\n"));

        assert_eq!(book.get("build"), Some("vite build"));
    }

    #[test]
    fn test_commands_joined_with_and_operator() {
        let mut book = ScriptBook::new();
        book.absorb(&parse_nodes(
            "name: release\ncommands:\n  - npm run build\n  - npm run test\n  - npm publish\n",
        ));

        assert_eq!(
            book.get("release"),
            Some("npm run build && npm run test && npm publish")
        );
    }

    #[test]
    fn test_line_entries_used_verbatim() {
        let def = ScriptDefinition {
            name: "x".to_string(),
            long_name: None,
            description: None,
            group: None,
            commands: vec![CommandEntry::Line("echo   spaced".to_string())],
        };

        let mut book = ScriptBook::new();
        book.insert(&def);
        assert_eq!(book.get("x"), Some("echo   spaced"));
    }

    #[test]
    fn test_nested_groups_flattened() {
        let mut book = ScriptBook::new();
        book.absorb(&parse_nodes(
            "scripts:\n  - name: a\n    command: echo a\n  - scripts:\n      - name: b\n        command: echo b\n      - scripts:\n          - name: c\n            command: echo c\n",
        ));

        assert_eq!(book.len(), 3);
        assert_eq!(book.get("c"), Some("echo c"));
    }

    #[test]
    fn test_docs_recorded_only_with_metadata() {
        let mut book = ScriptBook::new();
        book.absorb(&parse_nodes(
            "scripts:\n  - name: plain\n    command: echo hi\n  - name: documented\n    description: Does things\n    group: misc\n    command: echo hi\n",
        ));

        assert!(book.docs().get("plain").is_none());
        let entry = book.docs().get("documented").unwrap();
        assert_eq!(entry.description.as_deref(), Some("Does things"));
        assert_eq!(entry.group.as_deref(), Some("misc"));
    }

    #[test]
    fn test_group_round_trip_keeps_metadata() {
        let mut book = ScriptBook::new();
        book.absorb(&parse_nodes(
            "scripts:\n  - name: one\n    group: g\n    command: echo 1\n  - name: two\n    group: g\n    command: echo 2\n  - name: three\n    group: g\n    command: echo 3\n",
        ));

        assert_eq!(book.len(), 3);
        assert_eq!(book.docs().len(), 3);
        for name in ["one", "two", "three"] {
            assert_eq!(book.docs().get(name).unwrap().group.as_deref(), Some("g"));
        }
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let mut first = ScriptBook::new();
        first.absorb(&parse_nodes("name: dev\ncommand: vite\n"));

        let mut second = ScriptBook::new();
        second.absorb(&parse_nodes("name: dev\ncommand: vite --host\n"));

        first.merge(second);
        assert_eq!(first.len(), 1);
        assert_eq!(first.get("dev"), Some("vite --host"));
    }

    #[test]
    fn test_accumulates_across_documents() {
        let mut book = ScriptBook::new();
        book.absorb(&parse_nodes("name: a\ncommand: echo a\n"));
        book.absorb(&parse_nodes("name: b\ncommand: echo b\n"));

        assert_eq!(book.len(), 2);
    }
}
