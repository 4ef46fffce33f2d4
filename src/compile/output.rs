//! Output serialization.
//!
//! Sorts the compiled mapping into its deterministic order and renders the
//! persisted JSON documents. Serialization is a pure function of the mapping
//! contents: two differently-ordered mappings with identical entries produce
//! byte-identical text, which is what keeps compiled output diff-stable
//! across runs.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::book::DocEntry;

/// Product identity stamped into the generated scripts manifest.
const PRODUCT_NAME: &str = env!("CARGO_PKG_NAME");
const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sort compiled scripts: entries are grouped by the name prefix before the
/// first `:` (the whole name when there is none), groups ordered
/// lexicographically, names ordered lexicographically within each group.
pub fn sort_scripts(scripts: &IndexMap<String, String>) -> IndexMap<String, String> {
    let mut groups: BTreeMap<&str, BTreeMap<&str, &str>> = BTreeMap::new();

    for (name, line) in scripts {
        let prefix = name.split(':').next().unwrap_or(name);
        groups
            .entry(prefix)
            .or_default()
            .insert(name.as_str(), line.as_str());
    }

    groups
        .into_values()
        .flatten()
        .map(|(name, line)| (name.to_string(), line.to_string()))
        .collect()
}

/// Render the generated scripts manifest: a constant product envelope plus
/// the sorted scripts mapping, with stable key order and two-space
/// indentation.
pub fn render_scripts_manifest(scripts: &IndexMap<String, String>) -> String {
    let mut sorted = Map::new();
    for (name, line) in sort_scripts(scripts) {
        sorted.insert(name, Value::String(line));
    }

    let mut envelope = Map::new();
    envelope.insert("name".to_string(), Value::String(PRODUCT_NAME.to_string()));
    envelope.insert(
        "version".to_string(),
        Value::String(PRODUCT_VERSION.to_string()),
    );
    envelope.insert("scripts".to_string(), Value::Object(sorted));

    render(&Value::Object(envelope))
}

/// Render the documentation table, sorted by script name, omitting absent
/// fields.
pub fn render_docs(docs: &IndexMap<String, DocEntry>) -> String {
    let ordered: BTreeMap<&String, &DocEntry> = docs.iter().collect();
    let mut out = Map::new();
    for (name, entry) in ordered {
        let value = serde_json::to_value(entry).expect("doc entry serializes");
        out.insert(name.clone(), value);
    }

    render(&Value::Object(out))
}

fn render(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).expect("json value serializes");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sort_groups_by_prefix() {
        let scripts = mapping(&[
            ("test:unit", "vitest"),
            ("build", "vite build"),
            ("build:watch", "vite build --watch"),
            ("test", "vitest run"),
        ]);

        let names: Vec<_> = sort_scripts(&scripts).keys().cloned().collect();
        assert_eq!(names, vec!["build", "build:watch", "test", "test:unit"]);
    }

    #[test]
    fn test_group_sort_differs_from_plain_lexicographic() {
        // Plain byte order would put "a-x" before "a:b" ('-' < ':'), but the
        // group "a" sorts before the group "a-x".
        let scripts = mapping(&[("a-x", "1"), ("a:b", "2")]);

        let names: Vec<_> = sort_scripts(&scripts).keys().cloned().collect();
        assert_eq!(names, vec!["a:b", "a-x"]);
    }

    #[test]
    fn test_serialization_order_independent() {
        let forward = mapping(&[("dev", "vite"), ("build", "vite build"), ("b:x", "echo")]);
        let reverse = mapping(&[("b:x", "echo"), ("build", "vite build"), ("dev", "vite")]);

        assert_eq!(
            render_scripts_manifest(&forward),
            render_scripts_manifest(&reverse)
        );
    }

    #[test]
    fn test_manifest_envelope_shape() {
        let scripts = mapping(&[("build", "vite build")]);
        let expected = format!(
            "{{\n  \"name\": \"{PRODUCT_NAME}\",\n  \"version\": \"{PRODUCT_VERSION}\",\n  \"scripts\": {{\n    \"build\": \"vite build\"\n  }}\n}}\n"
        );

        assert_eq!(render_scripts_manifest(&scripts), expected);
    }

    #[test]
    fn test_render_docs_sorted_and_sparse() {
        let mut docs = IndexMap::new();
        docs.insert(
            "zeta".to_string(),
            DocEntry {
                long_name: None,
                description: Some("Last".to_string()),
                group: None,
            },
        );
        docs.insert(
            "alpha".to_string(),
            DocEntry {
                long_name: Some("Alpha Script".to_string()),
                description: None,
                group: Some("core".to_string()),
            },
        );

        let text = render_docs(&docs);
        let alpha = text.find("alpha").unwrap();
        let zeta = text.find("zeta").unwrap();
        assert!(alpha < zeta);

        // Absent fields are omitted entirely.
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(parsed["zeta"].get("longName").is_none());
        assert_eq!(parsed["alpha"]["longName"], "Alpha Script");
        assert_eq!(parsed["alpha"]["group"], "core");
    }
}
