//! Project manifest (package.json) access.
//!
//! The manifest is kept as a raw JSON object so that `mpj write` can splice
//! the compiled scripts mapping into the `scripts` field while leaving every
//! other field untouched, in its original position.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::compile::sort_scripts;
use crate::error::{MpjError, Result};

/// A loaded package.json.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    raw: Value,
}

impl Manifest {
    /// Load the manifest from a project directory.
    ///
    /// # Errors
    ///
    /// Fails when package.json cannot be read, is not valid JSON, or is not
    /// a JSON object.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join("package.json");
        let content =
            fs::read_to_string(&path).map_err(MpjError::io_context("read", path.clone()))?;
        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: PathBuf) -> Result<Self> {
        let raw: Value = serde_json::from_str(content).map_err(|e| MpjError::ManifestParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if !raw.is_object() {
            return Err(MpjError::ManifestParse {
                path,
                message: format!("expected a JSON object, got {}", json_type(&raw)),
            });
        }

        Ok(Self { path, raw })
    }

    /// Path of the loaded file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of installed dependencies (`dependencies` + `devDependencies`).
    pub fn installed_packages(&self) -> HashSet<String> {
        let mut packages = HashSet::new();
        for field in ["dependencies", "devDependencies"] {
            if let Some(deps) = self.raw.get(field).and_then(Value::as_object) {
                packages.extend(deps.keys().cloned());
            }
        }
        packages
    }

    /// The package manager name from the `packageManager` field, if set
    /// (e.g. `"pnpm@8.0.0"` yields `"pnpm"`).
    pub fn package_manager_name(&self) -> Option<&str> {
        self.raw
            .get("packageManager")
            .and_then(Value::as_str)
            .map(|pm| pm.split('@').next().unwrap_or(pm))
    }

    /// The current `scripts` field as a mapping, in file order.
    pub fn scripts(&self) -> IndexMap<String, String> {
        let mut scripts = IndexMap::new();
        if let Some(obj) = self.raw.get("scripts").and_then(Value::as_object) {
            for (name, value) in obj {
                if let Some(line) = value.as_str() {
                    scripts.insert(name.clone(), line.to_string());
                }
            }
        }
        scripts
    }

    /// Render the manifest with the compiled scripts spliced into the
    /// `scripts` field, sorted, and every other field untouched.
    pub fn render_with_scripts(&self, scripts: &IndexMap<String, String>) -> String {
        let mut merged = self.raw.clone();

        let mut sorted = serde_json::Map::new();
        for (name, line) in sort_scripts(scripts) {
            sorted.insert(name, Value::String(line));
        }

        merged
            .as_object_mut()
            .expect("manifest is an object")
            .insert("scripts".to_string(), Value::Object(sorted));

        let mut text = serde_json::to_string_pretty(&merged).expect("manifest serializes");
        text.push('\n');
        text
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
