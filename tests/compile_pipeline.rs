//! Integration tests for the compile pipeline using temp-dir projects.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use mpj::compile::{
    compile_dir, render_docs, render_scripts_manifest, CompileOptions, ScriptBook,
};
use mpj::definition::{parse_document, Strictness};

fn write_script(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn compile(dir: &Path) -> mpj::Compilation {
    compile_dir(dir, &HashSet::new(), &CompileOptions::default()).unwrap()
}

#[test]
fn test_group_document_round_trip() {
    let temp = TempDir::new().unwrap();
    write_script(
        temp.path(),
        "build.script.yaml",
        r#"scripts:
  - name: build
    longName: Production build
    description: Build the app for production
    group: build
    command: vite build
  - name: build:watch
    group: build
    command: vite build
    args:
      watch: true
  - name: build:clean
    group: build
    commands:
      - rm -rf dist
      - npm run build
"#,
    );

    let compilation = compile(temp.path());

    // Exactly three compiled scripts, no metadata loss.
    assert_eq!(compilation.book.len(), 3);
    assert!(compilation.is_clean());

    assert_eq!(compilation.book.get("build"), Some("vite build"));
    assert_eq!(
        compilation.book.get("build:watch"),
        Some("vite build --watch")
    );
    assert_eq!(
        compilation.book.get("build:clean"),
        Some("rm -rf dist && npm run build")
    );

    let docs = compilation.book.docs();
    assert_eq!(docs.len(), 3);
    assert_eq!(
        docs.get("build").unwrap().long_name.as_deref(),
        Some("Production build")
    );
    assert_eq!(docs.get("build:watch").unwrap().group.as_deref(), Some("build"));
}

#[test]
fn test_forward_reference_across_files() {
    let temp = TempDir::new().unwrap();
    // Sorted discovery order puts a.yaml before z.yaml; a references a
    // script that only z defines.
    write_script(temp.path(), "a.yaml", "name: caller\ncommand: npm run callee\n");
    write_script(temp.path(), "z.yaml", "name: callee\ncommand: echo hi\n");

    let compilation = compile(temp.path());
    assert!(compilation.is_clean());
}

#[test]
fn test_unknown_reference_collected_not_fatal() {
    let temp = TempDir::new().unwrap();
    write_script(temp.path(), "a.yaml", "name: build\ncommand: tsc\n");
    write_script(
        temp.path(),
        "b.yaml",
        "name: release\ncommand: npm run build && npm run missing\n",
    );

    let compilation = compile(temp.path());

    assert_eq!(compilation.errors.len(), 1);
    assert!(compilation.errors[0].message.contains("\"missing\""));
    // Output is still complete.
    assert_eq!(compilation.book.len(), 2);
}

#[test]
fn test_duplicate_names_across_files_diagnosed() {
    let temp = TempDir::new().unwrap();
    write_script(temp.path(), "a.yaml", "name: dev\ncommand: vite\n");
    write_script(temp.path(), "b.yaml", "name: dev\ncommand: vite --host\n");

    let compilation = compile(temp.path());

    assert_eq!(compilation.errors.len(), 1);
    assert!(compilation.errors[0].message.contains("already defined"));
    // Last write wins in the book itself.
    assert_eq!(compilation.book.get("dev"), Some("vite --host"));
}

#[test]
fn test_nested_directories_enumerated() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("ci").join("deep");
    fs::create_dir_all(&nested).unwrap();

    write_script(temp.path(), "top.yaml", "name: top\ncommand: echo top\n");
    write_script(&nested, "deep.script.yaml", "name: deep\ncommand: echo deep\n");

    let compilation = compile(temp.path());
    assert_eq!(compilation.book.len(), 2);
    assert_eq!(compilation.file_count, 2);
}

#[test]
fn test_strict_and_lenient_pipelines_diverge() {
    let text = "name: broken\ndescription: no command source\n";

    // Strict parser raises.
    let strict = parse_document(text, Strictness::Strict);
    assert!(matches!(
        strict,
        Err(mpj::MpjError::MissingCommand { .. })
    ));

    // Lenient path skips with a diagnostic instead.
    let lenient = parse_document(text, Strictness::Lenient).unwrap();
    assert!(lenient.nodes.is_empty());
    assert_eq!(lenient.skipped.len(), 1);
    assert!(lenient.skipped[0].contains("broken"));
}

#[test]
fn test_flatten_matches_wrap_for_single_command() {
    let doc = parse_document(
        "name: serve\ncommand: vite\nenv:\n  PORT: 3000\n",
        Strictness::Strict,
    )
    .unwrap();

    let mut book = ScriptBook::new();
    book.absorb(&doc.nodes);

    // Single command: no AND-joining, just the wrapped entry.
    assert_eq!(book.get("serve"), Some("cross-env PORT=3000 vite"));
}

#[test]
fn test_rendered_output_is_diff_stable() {
    let temp_a = TempDir::new().unwrap();
    let temp_b = TempDir::new().unwrap();

    // Same definitions authored across different file layouts.
    write_script(
        temp_a.path(),
        "all.yaml",
        "scripts:\n  - name: b\n    command: echo b\n  - name: a\n    command: echo a\n",
    );
    write_script(temp_b.path(), "1.yaml", "name: a\ncommand: echo a\n");
    write_script(temp_b.path(), "2.yaml", "name: b\ncommand: echo b\n");

    let a = compile(temp_a.path());
    let b = compile(temp_b.path());

    assert_eq!(
        render_scripts_manifest(a.book.scripts()),
        render_scripts_manifest(b.book.scripts())
    );
}

#[test]
fn test_docs_render_omits_undocumented_scripts() {
    let temp = TempDir::new().unwrap();
    write_script(
        temp.path(),
        "mixed.yaml",
        "scripts:\n  - name: plain\n    command: echo hi\n  - name: doc\n    description: documented\n    command: echo hi\n",
    );

    let compilation = compile(temp.path());
    let rendered = render_docs(compilation.book.docs());
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert!(parsed.get("plain").is_none());
    assert_eq!(parsed["doc"]["description"], "documented");
}
